//! Data Transfer Objects for the HTTP API.
//!
//! Domain types already derive Serialize/Deserialize and are used directly as
//! response bodies; this module adds the request/query/envelope types the
//! REST surface needs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export domain types that double as API payloads.
pub use crate::api::{
    GenerationFailure, GenerationReport, Page, Schedule, ScheduleChanges, ScheduleConflict,
    ScheduleDraft, TeachingActivity,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
}

/// Schedule list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<Schedule>,
    pub total: usize,
}

/// Acknowledgement for deactivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateResponse {
    pub schedule_id: i64,
    pub active: bool,
}

/// Query parameters for activity generation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateQuery {
    /// Date to generate for; defaults to the current date
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for the pending-activities listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingQuery {
    pub teacher_id: i64,
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size (default 20, clamped to 100)
    #[serde(default)]
    pub size: Option<usize>,
}
