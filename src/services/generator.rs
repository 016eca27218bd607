//! Recurring activity generation.
//!
//! Expands every active schedule firing on a date into one dated teaching
//! activity, exactly once per `(schedule, date)`. The run is a restartable
//! batch: it can be triggered from cron, an HTTP endpoint, or by hand, and
//! repeating or interrupting it is harmless — existing rows are skipped and
//! the store's uniqueness constraint settles any race two concurrent runs
//! might get into.

use chrono::NaiveDate;
use log::{info, warn};

use crate::api::{
    DayOfWeek, GenerationFailure, GenerationReport, NewTeachingActivity, Schedule,
};
use crate::db::repository::{FullRepository, RepositoryResult};

/// Placeholder topic stamped on generated activities until a teacher fills
/// one in.
pub const DEFAULT_TOPIC: &str = "-";

/// Build the activity row a schedule materializes into on `date`.
///
/// Subject, teacher, classroom, and times are copied from the schedule so
/// later schedule edits never retroactively alter historical activities.
pub fn activity_from_schedule(schedule: &Schedule, date: NaiveDate) -> NewTeachingActivity {
    NewTeachingActivity {
        schedule_id: Some(schedule.id),
        subject_id: schedule.subject_id,
        teacher_id: schedule.teacher_id,
        classroom_id: schedule.classroom_id,
        date,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
        topic: DEFAULT_TOPIC.to_string(),
    }
}

/// Materialize teaching activities for every active schedule firing on
/// `date`.
///
/// Returns a tally of created and skipped schedules plus per-schedule
/// failures. A single schedule's failure never aborts the batch; the call as
/// a whole only fails when the store itself is unreachable.
pub async fn generate_activities_for<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> RepositoryResult<GenerationReport> {
    let day = DayOfWeek::from_date(date);
    let schedules = repo.active_schedules_for_day(day).await?;

    info!(
        "Generating activities for {} ({}): {} active schedule(s)",
        date,
        day,
        schedules.len()
    );

    let mut report = GenerationReport {
        date,
        created: 0,
        skipped: 0,
        failures: Vec::new(),
    };

    for schedule in &schedules {
        match repo.activity_exists(schedule.id, date).await {
            Ok(true) => {
                report.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    "Existence check failed for schedule {} on {}: {}",
                    schedule.id, date, e
                );
                report.failures.push(GenerationFailure {
                    schedule_id: schedule.id,
                    reason: e.to_string(),
                });
                continue;
            }
        }

        match repo.insert_activity(&activity_from_schedule(schedule, date)).await {
            Ok(_) => report.created += 1,
            // A concurrent run won the insert between our check and write;
            // the row exists, which is all this run needs.
            Err(e) if e.is_unique_violation() => report.skipped += 1,
            Err(e) => {
                warn!(
                    "Failed to materialize schedule {} on {}: {}",
                    schedule.id, date, e
                );
                report.failures.push(GenerationFailure {
                    schedule_id: schedule.id,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Generation for {} finished: {} created, {} skipped, {} failure(s)",
        date,
        report.created,
        report.skipped,
        report.failures.len()
    );
    Ok(report)
}
