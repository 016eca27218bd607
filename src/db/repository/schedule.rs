//! Core CRUD and lookup operations for recurring schedule templates.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{
    ClassroomId, DayOfWeek, Schedule, ScheduleDraft, ScheduleId, TeacherId, Term,
};

/// Persistent store of recurring schedule templates.
///
/// The write path is responsible for assigning ids and stamping
/// `created_at`/`updated_at`; callers never set those fields.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check that the underlying store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Persist a new schedule from a validated draft. New schedules are active.
    async fn insert_schedule(&self, draft: &ScheduleDraft) -> RepositoryResult<Schedule>;

    /// Persist the given schedule over its existing record, stamping
    /// `updated_at`. Fails with NotFound if the id is unknown.
    async fn update_schedule(&self, schedule: &Schedule) -> RepositoryResult<Schedule>;

    /// Fetch one schedule by id.
    async fn get_schedule(&self, id: ScheduleId) -> RepositoryResult<Schedule>;

    /// All schedules, active and inactive, ordered by id.
    async fn list_schedules(&self) -> RepositoryResult<Vec<Schedule>>;

    /// Active schedules for a teacher on a given day of week within a term.
    async fn active_schedules_for_teacher(
        &self,
        teacher_id: TeacherId,
        day: DayOfWeek,
        term: &Term,
    ) -> RepositoryResult<Vec<Schedule>>;

    /// Active schedules for a classroom on a given day of week within a term.
    async fn active_schedules_for_classroom(
        &self,
        classroom_id: ClassroomId,
        day: DayOfWeek,
        term: &Term,
    ) -> RepositoryResult<Vec<Schedule>>;

    /// Active schedules firing on the given day of week, across all terms.
    ///
    /// Term windowing (whether a term's schedules should still be running) is
    /// expressed through the `active` flag, so this is the only filter
    /// generation needs.
    async fn active_schedules_for_day(&self, day: DayOfWeek) -> RepositoryResult<Vec<Schedule>>;
}
