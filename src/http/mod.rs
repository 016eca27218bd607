//! HTTP server module for the scheduling core.
//!
//! An axum-based REST API over the service layer. Handlers stay thin: request
//! parsing and serialization here, business logic in [`crate::services`],
//! persistence behind [`crate::db`].

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
