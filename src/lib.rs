//! # schoolsched
//!
//! Class scheduling core of a school administrative records application.
//!
//! The surrounding application (students, payments, counseling, invoices) is
//! plain persistence-and-mapping and lives elsewhere; this crate owns the one
//! subsystem that needs algorithmic care:
//!
//! - **Recurring schedules**: weekly (teacher, classroom, subject) templates
//!   scoped to an academic term
//! - **Conflict detection**: no double-booking of a teacher or a classroom,
//!   using strict half-open interval overlap
//! - **Activity generation**: exactly-once expansion of schedules into dated
//!   teaching activities, safe under repeated or concurrent runs
//!
//! ## Architecture
//!
//! - [`api`]: Domain types and ID newtypes shared across layers
//! - [`db`]: Repository pattern over the schedule and activity stores
//! - [`directory`]: Read-only lookups of teachers, classrooms, and subjects
//! - [`services`]: Conflict detection, schedule management, generation,
//!   activity queries
//! - [`http`]: Axum-based REST API (feature `http-server`)

pub mod api;
pub mod db;
pub mod directory;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
