//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ConflictDimension, ScheduleConflict};
use crate::db::repository::RepositoryError;
use crate::services::SchedulingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Conflicting schedules, present only on conflict errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<ConflictDto>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            conflicts: None,
        }
    }

    pub fn with_conflicts(mut self, conflicts: Vec<ConflictDto>) -> Self {
        self.conflicts = Some(conflicts);
        self
    }
}

/// One conflicting schedule in an error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictDto {
    pub schedule_id: i64,
    pub dimension: ConflictDimension,
    pub start_time: String,
    pub end_time: String,
}

impl From<&ScheduleConflict> for ConflictDto {
    fn from(conflict: &ScheduleConflict) -> Self {
        Self {
            schedule_id: conflict.schedule_id.value(),
            dimension: conflict.dimension,
            start_time: conflict.start_time.format("%H:%M").to_string(),
            end_time: conflict.end_time.format("%H:%M").to_string(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    Validation(String),
    /// Candidate schedule double-books a teacher or classroom
    Conflict(Vec<ScheduleConflict>),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("VALIDATION_ERROR", msg),
            ),
            AppError::Conflict(conflicts) => {
                let dtos: Vec<ConflictDto> = conflicts.iter().map(Into::into).collect();
                (
                    StatusCode::CONFLICT,
                    ApiError::new(
                        "SCHEDULE_CONFLICT",
                        format!(
                            "Schedule conflicts with {} existing schedule(s)",
                            dtos.len()
                        ),
                    )
                    .with_conflicts(dtos),
                )
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", e.to_string()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation(msg) => AppError::Validation(msg),
            SchedulingError::NotFound(msg) => AppError::NotFound(msg),
            SchedulingError::Conflict(conflicts) => AppError::Conflict(conflicts),
            SchedulingError::Repository(e) => AppError::Repository(e),
            SchedulingError::Directory(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveTime;
    use crate::api::ScheduleId;

    #[test]
    fn scheduling_errors_map_to_expected_statuses() {
        let validation: AppError =
            SchedulingError::Validation("start_time must be before end_time".to_string()).into();
        assert_eq!(
            validation.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let not_found: AppError = SchedulingError::NotFound("Teacher 9 not found".to_string()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict: AppError = SchedulingError::Conflict(vec![ScheduleConflict {
            schedule_id: ScheduleId::new(1),
            dimension: ConflictDimension::Room,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }])
        .into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn conflict_payload_carries_dimension_label() {
        let dto = ConflictDto::from(&ScheduleConflict {
            schedule_id: ScheduleId::new(7),
            dimension: ConflictDimension::Teacher,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["dimension"], "TEACHER_CONFLICT");
        assert_eq!(json["schedule_id"], 7);
        assert_eq!(json["start_time"], "08:00");
    }
}
