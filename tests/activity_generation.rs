//! Recurring activity generation: idempotency, resumability, and failure
//! tolerance.

mod support;

use chrono::NaiveDate;

use schoolsched::api::DayOfWeek;
use schoolsched::db::repository::{ActivityRepository, ScheduleRepository};
use schoolsched::services::{
    activity_from_schedule, generate_activities_for, DEFAULT_TOPIC,
};
use support::{draft, monday, t, test_env};

#[tokio::test]
async fn generation_is_idempotent_across_runs() {
    let env = test_env();

    // Three active Monday schedules.
    env.manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    env.manager
        .create_schedule(draft(2, 2, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    env.manager
        .create_schedule(draft(3, 3, t(10, 0), t(11, 0)))
        .await
        .unwrap();

    // One deactivated Monday schedule, excluded from generation.
    let inactive = env
        .manager
        .create_schedule(draft(1, 2, t(12, 0), t(13, 0)))
        .await
        .unwrap();
    env.manager.deactivate_schedule(inactive.id).await.unwrap();

    let first = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(first.created, 3);
    assert_eq!(first.skipped, 0);
    assert!(first.failures.is_empty());
    assert_eq!(env.repo.activity_count(), 3);

    let second = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 3);
    assert!(second.failures.is_empty());
    assert_eq!(env.repo.activity_count(), 3);
}

#[tokio::test]
async fn interrupted_run_is_completed_by_the_next_one() {
    let env = test_env();

    let s1 = env
        .manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    let s2 = env
        .manager
        .create_schedule(draft(2, 2, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    env.manager
        .create_schedule(draft(3, 3, t(10, 0), t(11, 0)))
        .await
        .unwrap();

    // Simulate a run that died after materializing two of three schedules.
    env.repo
        .insert_activity(&activity_from_schedule(&s1, monday()))
        .await
        .unwrap();
    env.repo
        .insert_activity(&activity_from_schedule(&s2, monday()))
        .await
        .unwrap();

    let report = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(env.repo.activity_count(), 3);
}

#[tokio::test]
async fn generated_activity_copies_schedule_snapshot() {
    let env = test_env();

    let schedule = env
        .manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();

    let page = env
        .repo
        .pending_activities(schedule.teacher_id, Default::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let activity = &page.items[0];
    assert_eq!(activity.schedule_id, Some(schedule.id));
    assert_eq!(activity.subject_id, schedule.subject_id);
    assert_eq!(activity.classroom_id, schedule.classroom_id);
    assert_eq!(activity.date, monday());
    assert_eq!(activity.start_time, schedule.start_time);
    assert_eq!(activity.end_time, schedule.end_time);
    assert_eq!(activity.topic, DEFAULT_TOPIC);
    assert!(!activity.is_completed);

    // Editing the schedule afterwards never rewrites history.
    let mut moved = schedule.clone();
    moved.start_time = t(13, 0);
    moved.end_time = t(14, 0);
    env.repo.update_schedule(&moved).await.unwrap();

    let page = env
        .repo
        .pending_activities(schedule.teacher_id, Default::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].start_time, t(8, 0));
}

#[tokio::test]
async fn only_the_requested_day_is_generated() {
    let env = test_env();

    env.manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    let mut tuesday = draft(2, 2, t(8, 0), t(9, 0));
    tuesday.day_of_week = DayOfWeek::Tuesday;
    env.manager.create_schedule(tuesday).await.unwrap();

    let report = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(report.created, 1);

    // The Tuesday schedule fires the next day instead.
    let tuesday_date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
    let report = generate_activities_for(env.repo.as_ref(), tuesday_date)
        .await
        .unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 0);
}

#[tokio::test]
async fn corrupt_schedule_fails_alone_and_keeps_failing() {
    let env = test_env();

    env.manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    env.manager
        .create_schedule(draft(2, 2, t(8, 0), t(9, 0)))
        .await
        .unwrap();

    // Legacy row with an inverted window, written below the manager's
    // validation; the activity store rejects what it would materialize into.
    let mut corrupt = draft(3, 3, t(10, 0), t(11, 0));
    corrupt.start_time = t(11, 0);
    corrupt.end_time = t(11, 0);
    let corrupt = env.repo.insert_schedule(&corrupt).await.unwrap();

    let report = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].schedule_id, corrupt.id);
    assert_eq!(env.repo.activity_count(), 2);

    // The healthy schedules are not re-created; the corrupt one still fails.
    let rerun = generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();
    assert_eq!(rerun.created, 0);
    assert_eq!(rerun.skipped, 2);
    assert_eq!(rerun.failures.len(), 1);
}

#[tokio::test]
async fn store_outage_fails_the_whole_batch() {
    let env = test_env();
    env.manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();

    env.repo.set_healthy(false);
    assert!(generate_activities_for(env.repo.as_ref(), monday()).await.is_err());
}

#[tokio::test]
async fn generation_never_mutates_schedules() {
    let env = test_env();
    let schedule = env
        .manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();

    generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();

    let stored = env.repo.get_schedule(schedule.id).await.unwrap();
    assert_eq!(stored, schedule);
}
