//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{
    DeactivateResponse, GenerateQuery, HealthResponse, PendingQuery, ScheduleListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    ActivityId, GenerationReport, Page, PageRequest, Schedule, ScheduleChanges, ScheduleDraft,
    ScheduleId, TeacherId, TeachingActivity,
};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
    }))
}

// =============================================================================
// Schedules
// =============================================================================

/// POST /v1/schedules
///
/// Create a new schedule. Returns 201 with the stored schedule, 409 with the
/// conflicting schedules, 422 on validation errors, or 404 for unknown
/// resource references.
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(draft): Json<ScheduleDraft>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = state.manager.create_schedule(draft).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// GET /v1/schedules
///
/// List all schedules, active and inactive.
pub async fn list_schedules(State(state): State<AppState>) -> HandlerResult<ScheduleListResponse> {
    let schedules = state.repository.list_schedules().await?;
    let total = schedules.len();
    Ok(Json(ScheduleListResponse { schedules, total }))
}

/// GET /v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Schedule> {
    let schedule = state.repository.get_schedule(ScheduleId::new(id)).await?;
    Ok(Json(schedule))
}

/// PUT /v1/schedules/{id}
///
/// Apply a partial update; same error shape as create.
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<ScheduleChanges>,
) -> HandlerResult<Schedule> {
    let schedule = state
        .manager
        .update_schedule(ScheduleId::new(id), changes)
        .await?;
    Ok(Json(schedule))
}

/// POST /v1/schedules/{id}/deactivate
///
/// Soft-deactivate a schedule. Idempotent.
pub async fn deactivate_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeactivateResponse> {
    let schedule = state.manager.deactivate_schedule(ScheduleId::new(id)).await?;
    Ok(Json(DeactivateResponse {
        schedule_id: schedule.id.value(),
        active: schedule.active,
    }))
}

// =============================================================================
// Activities
// =============================================================================

/// POST /v1/activities/generate?date=YYYY-MM-DD
///
/// Materialize today's (or the given date's) activities. Safe to call
/// repeatedly; per-schedule failures are reported in the summary, not as an
/// error status.
pub async fn generate_activities(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> HandlerResult<GenerationReport> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let report = services::generate_activities_for(state.repository.as_ref(), date).await?;
    Ok(Json(report))
}

/// GET /v1/activities/pending?teacher_id=&page=&size=
///
/// A teacher's incomplete activities, newest first.
pub async fn pending_activities(
    State(state): State<AppState>,
    Query(query): Query<PendingQuery>,
) -> HandlerResult<Page<TeachingActivity>> {
    let page = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
    );
    let result = services::pending_activities(
        state.repository.as_ref(),
        TeacherId::new(query.teacher_id),
        page,
    )
    .await?;
    Ok(Json(result))
}

/// POST /v1/activities/{id}/complete
///
/// Mark an activity as completed. Idempotent.
pub async fn complete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<TeachingActivity> {
    let activity =
        services::mark_completed(state.repository.as_ref(), ActivityId::new(id)).await?;
    Ok(Json(activity))
}
