//! Public API surface for the scheduling core.
//!
//! This file consolidates the domain types shared by the repository layer,
//! the service layer, and the HTTP API. All types derive Serialize/Deserialize
//! for JSON serialization.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, ScheduleId);
define_id_type!(i64, ActivityId);
define_id_type!(i64, TeacherId);
define_id_type!(i64, ClassroomId);
define_id_type!(i64, SubjectId);

/// Day of the week a recurring schedule fires on.
///
/// A dedicated enum (rather than `chrono::Weekday`) so that unknown values in
/// request payloads are rejected at deserialization time with a clear error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Day of week for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic term: the (academic year, semester) pair that scopes conflict
/// checks and activity generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Academic year token, e.g. "2024/2025"
    pub academic_year: String,
    /// Semester within the year (1-based)
    pub semester: u8,
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} S{}", self.academic_year, self.semester)
    }
}

/// Recurring weekly schedule template binding a subject, teacher, and
/// classroom to a fixed day-of-week and time window for a given term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    /// Academic year token, e.g. "2024/2025"
    pub academic_year: String,
    /// Semester within the year (1-based)
    pub semester: u8,
    pub day_of_week: DayOfWeek,
    /// Inclusive start of the teaching window
    pub start_time: NaiveTime,
    /// Exclusive end of the teaching window (start < end)
    pub end_time: NaiveTime,
    /// Inactive schedules are excluded from conflict checks and generation
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn term(&self) -> Term {
        Term {
            academic_year: self.academic_year.clone(),
            semester: self.semester,
        }
    }
}

/// Payload for creating a new schedule. The id and timestamps are assigned by
/// the store; new schedules start out active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub academic_year: String,
    pub semester: u8,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleDraft {
    pub fn term(&self) -> Term {
        Term {
            academic_year: self.academic_year.clone(),
            semester: self.semester,
        }
    }
}

impl From<&Schedule> for ScheduleDraft {
    fn from(schedule: &Schedule) -> Self {
        Self {
            subject_id: schedule.subject_id,
            teacher_id: schedule.teacher_id,
            classroom_id: schedule.classroom_id,
            academic_year: schedule.academic_year.clone(),
            semester: schedule.semester,
            day_of_week: schedule.day_of_week,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
        }
    }
}

/// Partial update for an existing schedule; `None` fields keep their current
/// value. Reactivation goes through `active` and is conflict-checked like any
/// other resource/time change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChanges {
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub classroom_id: Option<ClassroomId>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub semester: Option<u8>,
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Which booking dimension a conflict was detected on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictDimension {
    #[serde(rename = "TEACHER_CONFLICT")]
    Teacher,
    #[serde(rename = "ROOM_CONFLICT")]
    Room,
}

impl std::fmt::Display for ConflictDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Teacher => f.write_str("TEACHER_CONFLICT"),
            Self::Room => f.write_str("ROOM_CONFLICT"),
        }
    }
}

/// One existing schedule a candidate collides with, labeled with the
/// dimension that triggered it. A candidate overlapping the same schedule on
/// both dimensions yields two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub schedule_id: ScheduleId,
    pub dimension: ConflictDimension,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A single dated class session, materialized from a schedule template or
/// created ad hoc (`schedule_id = None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingActivity {
    pub id: ActivityId,
    pub schedule_id: Option<ScheduleId>,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub topic: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a teaching activity. The id and timestamps are assigned
/// by the store; activities start out incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeachingActivity {
    pub schedule_id: Option<ScheduleId>,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub topic: String,
}

/// Summary of one activity-generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub date: NaiveDate,
    /// Activities newly created by this run
    pub created: usize,
    /// Schedules whose activity for the date already existed
    pub skipped: usize,
    /// Schedules that could not be materialized; never aborts the batch
    pub failures: Vec<GenerationFailure>,
}

/// Per-schedule generation failure, aggregated into the run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub schedule_id: ScheduleId,
    pub reason: String,
}

/// Zero-based page request with a clamped page size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub const DEFAULT_SIZE: usize = 20;
    pub const MAX_SIZE: usize = 100;

    /// Build a page request, clamping the size into `1..=MAX_SIZE`.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    /// Total matching items across all pages
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.size)
        }
    }
}
