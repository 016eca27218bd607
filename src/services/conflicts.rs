//! Conflict detection for recurring schedules.
//!
//! A candidate schedule conflicts with an existing active schedule when both
//! occupy the same teacher or the same classroom, in the same term, on the
//! same day of week, with overlapping `[start, end)` windows. Overlap is
//! strict half-open intersection, so back-to-back lessons that touch at a
//! boundary never conflict.

use chrono::NaiveTime;

use crate::api::{ConflictDimension, Schedule, ScheduleConflict, ScheduleDraft, ScheduleId};
use crate::db::repository::{FullRepository, RepositoryResult};

/// Strict half-open interval overlap: `[s1, e1)` and `[s2, e2)` intersect iff
/// `s1 < e2 && s2 < e1`. Touching endpoints (`e1 == s2`) do not overlap.
pub fn overlaps(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

/// Pure conflict scan of a candidate window against already-fetched
/// schedules, labeling every hit with `dimension`.
///
/// `exclude` drops one schedule id from consideration, used when re-checking
/// an update against the store so a schedule never conflicts with its own
/// prior record.
pub fn find_conflicts(
    candidate: &ScheduleDraft,
    existing: &[Schedule],
    dimension: ConflictDimension,
    exclude: Option<ScheduleId>,
) -> Vec<ScheduleConflict> {
    existing
        .iter()
        .filter(|s| s.active)
        .filter(|s| Some(s.id) != exclude)
        .filter(|s| {
            overlaps(
                candidate.start_time,
                candidate.end_time,
                s.start_time,
                s.end_time,
            )
        })
        .map(|s| ScheduleConflict {
            schedule_id: s.id,
            dimension,
            start_time: s.start_time,
            end_time: s.end_time,
        })
        .collect()
}

/// Detect every active schedule a candidate would collide with.
///
/// Queries the store for the candidate's teacher and classroom bookings in
/// the same term and day of week, then tests strict interval overlap against
/// each subset. A candidate overlapping one schedule on both dimensions
/// yields two labeled records. No side effects; an empty result means the
/// candidate is safe to persist.
pub async fn detect_conflicts<R: FullRepository + ?Sized>(
    repo: &R,
    candidate: &ScheduleDraft,
    exclude: Option<ScheduleId>,
) -> RepositoryResult<Vec<ScheduleConflict>> {
    let term = candidate.term();

    let same_teacher = repo
        .active_schedules_for_teacher(candidate.teacher_id, candidate.day_of_week, &term)
        .await?;
    let same_classroom = repo
        .active_schedules_for_classroom(candidate.classroom_id, candidate.day_of_week, &term)
        .await?;

    let mut conflicts = find_conflicts(candidate, &same_teacher, ConflictDimension::Teacher, exclude);
    conflicts.extend(find_conflicts(
        candidate,
        &same_classroom,
        ConflictDimension::Room,
        exclude,
    ));
    Ok(conflicts)
}
