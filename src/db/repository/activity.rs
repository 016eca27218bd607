//! Store operations for dated teaching-activity occurrences.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{
    ActivityId, NewTeachingActivity, Page, PageRequest, ScheduleId, TeacherId, TeachingActivity,
};

/// Persistent store of dated teaching activities.
///
/// The store enforces a uniqueness constraint on `(schedule_id, date)` for
/// generated activities (ad hoc activities with `schedule_id = None` are
/// exempt). A duplicate insert fails with
/// [`RepositoryError::UniqueViolation`](super::RepositoryError::UniqueViolation),
/// which is the ultimate authority against concurrent generation races.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Insert a new activity, stamping id and timestamps.
    async fn insert_activity(
        &self,
        activity: &NewTeachingActivity,
    ) -> RepositoryResult<TeachingActivity>;

    /// Fetch one activity by id.
    async fn get_activity(&self, id: ActivityId) -> RepositoryResult<TeachingActivity>;

    /// Whether a generated activity already exists for `(schedule_id, date)`.
    async fn activity_exists(
        &self,
        schedule_id: ScheduleId,
        date: NaiveDate,
    ) -> RepositoryResult<bool>;

    /// A teacher's incomplete activities, ordered by date descending then
    /// start time descending.
    async fn pending_activities(
        &self,
        teacher_id: TeacherId,
        page: PageRequest,
    ) -> RepositoryResult<Page<TeachingActivity>>;

    /// Flip `is_completed` to true. Idempotent: completing an already
    /// completed activity returns it unchanged.
    async fn set_completed(&self, id: ActivityId) -> RepositoryResult<TeachingActivity>;
}
