//! Schedule Manager: the public entry point for schedule writes.
//!
//! Every create/update runs validation, resource resolution, conflict
//! detection, and the store write. The conflict check and the write execute
//! under one async mutex, so two concurrent requests can never both read
//! "no conflict" and both commit overlapping schedules. Schedule writes are
//! rare admin actions; a single lock is cheaper than a keyed one and strictly
//! stronger.

use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{
    Schedule, ScheduleChanges, ScheduleConflict, ScheduleDraft, ScheduleId,
};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::directory::{DirectoryError, ResourceDirectory};
use crate::services::conflicts;

/// Errors surfaced by schedule write operations.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// Malformed input: inverted time range, bad semester, missing field.
    /// Caller-correctable; never retried automatically.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced teacher/classroom/subject/schedule does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Candidate overlaps existing active schedules; carries every
    /// conflicting schedule id with the dimension that triggered it.
    #[error("schedule conflicts with {} existing schedule(s)", .0.len())]
    Conflict(Vec<ScheduleConflict>),

    /// Underlying store failure.
    #[error(transparent)]
    Repository(RepositoryError),

    /// Resource directory outage (distinct from a missing resource).
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl From<RepositoryError> for SchedulingError {
    fn from(err: RepositoryError) -> Self {
        // A missing schedule surfaces as the domain-level not-found.
        if err.is_not_found() {
            SchedulingError::NotFound(err.to_string())
        } else {
            SchedulingError::Repository(err)
        }
    }
}

/// Public write surface over the schedule store.
pub struct ScheduleManager {
    repository: Arc<dyn FullRepository>,
    directory: Arc<dyn ResourceDirectory>,
    // Serializes conflict-check-then-write across all schedule writes.
    write_lock: Mutex<()>,
}

impl ScheduleManager {
    pub fn new(
        repository: Arc<dyn FullRepository>,
        directory: Arc<dyn ResourceDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
            write_lock: Mutex::new(()),
        }
    }

    /// Validate, conflict-check, and persist a new schedule.
    pub async fn create_schedule(
        &self,
        draft: ScheduleDraft,
    ) -> Result<Schedule, SchedulingError> {
        validate_draft(&draft)?;
        self.resolve_draft_resources(&draft).await?;

        let _guard = self.write_lock.lock().await;

        let conflicts =
            conflicts::detect_conflicts(self.repository.as_ref(), &draft, None).await?;
        if !conflicts.is_empty() {
            return Err(SchedulingError::Conflict(conflicts));
        }

        let schedule = self.repository.insert_schedule(&draft).await?;
        info!(
            "Created schedule {} ({} {} {}-{}, teacher {}, classroom {})",
            schedule.id,
            schedule.term(),
            schedule.day_of_week,
            schedule.start_time,
            schedule.end_time,
            schedule.teacher_id,
            schedule.classroom_id,
        );
        Ok(schedule)
    }

    /// Apply a partial update to an existing schedule, re-running the
    /// conflict check (excluding the schedule's own prior record) whenever a
    /// booking-relevant field changes.
    pub async fn update_schedule(
        &self,
        id: ScheduleId,
        changes: ScheduleChanges,
    ) -> Result<Schedule, SchedulingError> {
        let _guard = self.write_lock.lock().await;

        let current = self.repository.get_schedule(id).await?;
        let merged = apply_changes(&current, &changes);

        let draft = ScheduleDraft::from(&merged);
        validate_draft(&draft)?;
        self.resolve_changed_resources(&current, &merged).await?;

        // Only booking-relevant changes can introduce new conflicts; a
        // metadata-only update (e.g. swapping the subject) skips the check,
        // as does deactivation.
        if merged.active && booking_fields_changed(&current, &merged) {
            let conflicts =
                conflicts::detect_conflicts(self.repository.as_ref(), &draft, Some(id)).await?;
            if !conflicts.is_empty() {
                return Err(SchedulingError::Conflict(conflicts));
            }
        }

        let updated = self.repository.update_schedule(&merged).await?;
        info!("Updated schedule {}", updated.id);
        Ok(updated)
    }

    /// Soft-deactivate a schedule so historical activities keep a valid
    /// reference. Idempotent: deactivating twice is a no-op.
    pub async fn deactivate_schedule(&self, id: ScheduleId) -> Result<Schedule, SchedulingError> {
        let _guard = self.write_lock.lock().await;

        let current = self.repository.get_schedule(id).await?;
        if !current.active {
            return Ok(current);
        }

        let mut deactivated = current;
        deactivated.active = false;
        let updated = self.repository.update_schedule(&deactivated).await?;
        info!("Deactivated schedule {}", updated.id);
        Ok(updated)
    }

    async fn resolve_draft_resources(&self, draft: &ScheduleDraft) -> Result<(), SchedulingError> {
        if self
            .directory
            .resolve_teacher(draft.teacher_id)
            .await?
            .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Teacher {} not found",
                draft.teacher_id
            )));
        }
        if self
            .directory
            .resolve_classroom(draft.classroom_id)
            .await?
            .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Classroom {} not found",
                draft.classroom_id
            )));
        }
        if self
            .directory
            .resolve_subject(draft.subject_id)
            .await?
            .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Subject {} not found",
                draft.subject_id
            )));
        }
        Ok(())
    }

    /// Resolve only the resource references an update actually changed;
    /// untouched references were validated when they were first set.
    async fn resolve_changed_resources(
        &self,
        current: &Schedule,
        merged: &Schedule,
    ) -> Result<(), SchedulingError> {
        if merged.teacher_id != current.teacher_id
            && self
                .directory
                .resolve_teacher(merged.teacher_id)
                .await?
                .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Teacher {} not found",
                merged.teacher_id
            )));
        }
        if merged.classroom_id != current.classroom_id
            && self
                .directory
                .resolve_classroom(merged.classroom_id)
                .await?
                .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Classroom {} not found",
                merged.classroom_id
            )));
        }
        if merged.subject_id != current.subject_id
            && self
                .directory
                .resolve_subject(merged.subject_id)
                .await?
                .is_none()
        {
            return Err(SchedulingError::NotFound(format!(
                "Subject {} not found",
                merged.subject_id
            )));
        }
        Ok(())
    }
}

/// Validate a draft's own fields. Conflicts are a separate concern: an
/// inverted time range is a validation error, never a conflict.
fn validate_draft(draft: &ScheduleDraft) -> Result<(), SchedulingError> {
    if draft.start_time >= draft.end_time {
        return Err(SchedulingError::Validation(format!(
            "start_time {} must be before end_time {}",
            draft.start_time, draft.end_time
        )));
    }
    if draft.semester == 0 {
        return Err(SchedulingError::Validation(
            "semester must be a positive integer".to_string(),
        ));
    }
    if draft.academic_year.trim().is_empty() {
        return Err(SchedulingError::Validation(
            "academic_year must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn apply_changes(current: &Schedule, changes: &ScheduleChanges) -> Schedule {
    let mut merged = current.clone();
    if let Some(subject_id) = changes.subject_id {
        merged.subject_id = subject_id;
    }
    if let Some(teacher_id) = changes.teacher_id {
        merged.teacher_id = teacher_id;
    }
    if let Some(classroom_id) = changes.classroom_id {
        merged.classroom_id = classroom_id;
    }
    if let Some(ref academic_year) = changes.academic_year {
        merged.academic_year = academic_year.clone();
    }
    if let Some(semester) = changes.semester {
        merged.semester = semester;
    }
    if let Some(day_of_week) = changes.day_of_week {
        merged.day_of_week = day_of_week;
    }
    if let Some(start_time) = changes.start_time {
        merged.start_time = start_time;
    }
    if let Some(end_time) = changes.end_time {
        merged.end_time = end_time;
    }
    if let Some(active) = changes.active {
        merged.active = active;
    }
    merged
}

/// Whether an update touched a field that participates in double-booking:
/// teacher, classroom, term, day, time window, or the active flag.
fn booking_fields_changed(current: &Schedule, merged: &Schedule) -> bool {
    current.teacher_id != merged.teacher_id
        || current.classroom_id != merged.classroom_id
        || current.academic_year != merged.academic_year
        || current.semester != merged.semester
        || current.day_of_week != merged.day_of_week
        || current.start_time != merged.start_time
        || current.end_time != merged.end_time
        || current.active != merged.active
}
