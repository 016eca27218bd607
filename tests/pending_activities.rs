//! Activity query service: pending feed ordering, paging, and completion.

mod support;

use chrono::NaiveDate;

use schoolsched::api::{
    ActivityId, NewTeachingActivity, PageRequest, TeacherId,
};
use schoolsched::db::repository::ActivityRepository;
use schoolsched::services::{generate_activities_for, mark_completed, pending_activities};
use support::{draft, monday, t, test_env};

fn ad_hoc(teacher: i64, date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> NewTeachingActivity {
    NewTeachingActivity {
        schedule_id: None,
        subject_id: schoolsched::api::SubjectId::new(1),
        teacher_id: TeacherId::new(teacher),
        classroom_id: schoolsched::api::ClassroomId::new(1),
        date,
        start_time: t(start.0, start.1),
        end_time: t(end.0, end.1),
        topic: "Substitute session".to_string(),
    }
}

#[tokio::test]
async fn feed_orders_newest_first_and_pages() {
    let env = test_env();

    let d1 = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    env.repo.insert_activity(&ad_hoc(1, d1, (8, 0), (9, 0))).await.unwrap();
    env.repo.insert_activity(&ad_hoc(1, d2, (7, 0), (8, 0))).await.unwrap();
    env.repo.insert_activity(&ad_hoc(1, d2, (10, 0), (11, 0))).await.unwrap();
    // Another teacher's activity stays out of the feed.
    env.repo.insert_activity(&ad_hoc(2, d2, (8, 0), (9, 0))).await.unwrap();

    let page = pending_activities(
        env.repo.as_ref(),
        TeacherId::new(1),
        PageRequest::new(0, 2),
    )
    .await
    .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.items.len(), 2);
    // Date descending, then start time descending.
    assert_eq!(page.items[0].date, d2);
    assert_eq!(page.items[0].start_time, t(10, 0));
    assert_eq!(page.items[1].date, d2);
    assert_eq!(page.items[1].start_time, t(7, 0));

    let rest = pending_activities(
        env.repo.as_ref(),
        TeacherId::new(1),
        PageRequest::new(1, 2),
    )
    .await
    .unwrap();
    assert_eq!(rest.items.len(), 1);
    assert_eq!(rest.items[0].date, d1);
}

#[tokio::test]
async fn completion_removes_from_feed_and_is_idempotent() {
    let env = test_env();

    let activity = env
        .repo
        .insert_activity(&ad_hoc(1, monday(), (8, 0), (9, 0)))
        .await
        .unwrap();

    let done = mark_completed(env.repo.as_ref(), activity.id).await.unwrap();
    assert!(done.is_completed);

    let again = mark_completed(env.repo.as_ref(), activity.id).await.unwrap();
    assert_eq!(again.updated_at, done.updated_at);

    let page = pending_activities(
        env.repo.as_ref(),
        TeacherId::new(1),
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn completing_missing_activity_is_not_found() {
    let env = test_env();
    let err = mark_completed(env.repo.as_ref(), ActivityId::new(404))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn generated_and_ad_hoc_activities_share_the_feed() {
    let env = test_env();

    env.manager
        .create_schedule(draft(1, 1, t(8, 0), t(9, 0)))
        .await
        .unwrap();
    generate_activities_for(env.repo.as_ref(), monday()).await.unwrap();

    env.repo
        .insert_activity(&ad_hoc(1, monday(), (14, 0), (15, 0)))
        .await
        .unwrap();

    let page = pending_activities(
        env.repo.as_ref(),
        TeacherId::new(1),
        PageRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.total, 2);
    // Ad hoc afternoon session sorts before the generated morning one.
    assert!(page.items[0].schedule_id.is_none());
    assert!(page.items[1].schedule_id.is_some());
}
