//! Read-side helpers over the activity store.

use log::info;

use crate::api::{ActivityId, Page, PageRequest, TeacherId, TeachingActivity};
use crate::db::repository::{FullRepository, RepositoryResult};

/// A teacher's outstanding (incomplete) activities, newest first: date
/// descending, then start time descending.
pub async fn pending_activities<R: FullRepository + ?Sized>(
    repo: &R,
    teacher_id: TeacherId,
    page: PageRequest,
) -> RepositoryResult<Page<TeachingActivity>> {
    repo.pending_activities(teacher_id, page).await
}

/// Mark an activity as completed. Idempotent: completing twice is a no-op.
pub async fn mark_completed<R: FullRepository + ?Sized>(
    repo: &R,
    activity_id: ActivityId,
) -> RepositoryResult<TeachingActivity> {
    let activity = repo.set_completed(activity_id).await?;
    info!("Activity {} marked completed", activity.id);
    Ok(activity)
}
