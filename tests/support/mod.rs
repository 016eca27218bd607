//! Shared fixtures for integration tests.

// Each integration test binary compiles this module separately and uses a
// different subset of the helpers.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use schoolsched::api::{ClassroomId, DayOfWeek, ScheduleDraft, SubjectId, TeacherId};
use schoolsched::db::repositories::LocalRepository;
use schoolsched::directory::StaticDirectory;
use schoolsched::services::ScheduleManager;

pub const YEAR: &str = "2024/2025";

/// Everything a test needs: the raw repository, the seeded directory, and a
/// manager wired over both.
pub struct TestEnv {
    pub repo: Arc<LocalRepository>,
    pub directory: Arc<StaticDirectory>,
    pub manager: ScheduleManager,
}

pub fn test_env() -> TestEnv {
    let repo = Arc::new(LocalRepository::new());
    let directory = seeded_directory();
    let manager = ScheduleManager::new(repo.clone(), directory.clone());
    TestEnv {
        repo,
        directory,
        manager,
    }
}

/// Directory with teachers/classrooms/subjects 1..=3 known.
pub fn seeded_directory() -> Arc<StaticDirectory> {
    let directory = StaticDirectory::new();
    directory.add_teacher(TeacherId::new(1), "A. Wijaya");
    directory.add_teacher(TeacherId::new(2), "B. Santoso");
    directory.add_teacher(TeacherId::new(3), "C. Putri");
    directory.add_classroom(ClassroomId::new(1), "Room 101");
    directory.add_classroom(ClassroomId::new(2), "Room 102");
    directory.add_classroom(ClassroomId::new(3), "Lab A");
    directory.add_subject(SubjectId::new(1), "Mathematics");
    directory.add_subject(SubjectId::new(2), "Physics");
    directory.add_subject(SubjectId::new(3), "History");
    Arc::new(directory)
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A Monday in term 2024/2025 S1.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

/// Draft for subject 1 in term 2024/2025 S1 on Monday.
pub fn draft(
    teacher: i64,
    classroom: i64,
    start: NaiveTime,
    end: NaiveTime,
) -> ScheduleDraft {
    ScheduleDraft {
        subject_id: SubjectId::new(1),
        teacher_id: TeacherId::new(teacher),
        classroom_id: ClassroomId::new(classroom),
        academic_year: YEAR.to_string(),
        semester: 1,
        day_of_week: DayOfWeek::Monday,
        start_time: start,
        end_time: end,
    }
}
