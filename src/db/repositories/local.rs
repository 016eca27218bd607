//! In-memory local repository implementation.
//!
//! Stores all data in HashMaps guarded by a single `RwLock`, giving fast,
//! deterministic, isolated execution for unit tests and local development.
//! The `(schedule_id, date)` uniqueness constraint on activities is enforced
//! here exactly as a database unique index would be: a duplicate insert fails
//! with [`RepositoryError::UniqueViolation`].

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::api::{
    ActivityId, ClassroomId, DayOfWeek, NewTeachingActivity, Page, PageRequest, Schedule,
    ScheduleDraft, ScheduleId, TeacherId, TeachingActivity, Term,
};
use crate::db::repository::{
    ActivityRepository, ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository,
};

/// In-memory repository for schedules and teaching activities.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    schedules: HashMap<ScheduleId, Schedule>,
    activities: HashMap<ActivityId, TeachingActivity>,
    // Unique index backing the (schedule_id, date) constraint; ad hoc
    // activities (schedule_id = None) are exempt.
    activity_index: HashSet<(ScheduleId, NaiveDate)>,

    next_schedule_id: i64,
    next_activity_id: i64,

    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            schedules: HashMap::new(),
            activities: HashMap::new(),
            activity_index: HashSet::new(),
            next_schedule_id: 1,
            next_activity_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Number of schedules stored.
    pub fn schedule_count(&self) -> usize {
        self.data.read().schedules.len()
    }

    /// Number of activities stored.
    pub fn activity_count(&self) -> usize {
        self.data.read().activities.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Repository is not healthy"));
        }
        Ok(())
    }

    fn get_schedule_impl(&self, id: ScheduleId) -> RepositoryResult<Schedule> {
        self.data.read().schedules.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Schedule {} not found", id),
                ErrorContext::new("get_schedule")
                    .with_entity("schedule")
                    .with_entity_id(id),
            )
        })
    }

    fn active_matching(&self, predicate: impl Fn(&Schedule) -> bool) -> Vec<Schedule> {
        let data = self.data.read();
        let mut matches: Vec<Schedule> = data
            .schedules
            .values()
            .filter(|s| s.active && predicate(s))
            .cloned()
            .collect();
        matches.sort_by_key(|s| s.id);
        matches
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_schedule(&self, draft: &ScheduleDraft) -> RepositoryResult<Schedule> {
        self.check_health()?;

        let mut data = self.data.write();
        let id = ScheduleId::new(data.next_schedule_id);
        data.next_schedule_id += 1;

        let now = Utc::now();
        let schedule = Schedule {
            id,
            subject_id: draft.subject_id,
            teacher_id: draft.teacher_id,
            classroom_id: draft.classroom_id,
            academic_year: draft.academic_year.clone(),
            semester: draft.semester,
            day_of_week: draft.day_of_week,
            start_time: draft.start_time,
            end_time: draft.end_time,
            active: true,
            created_at: now,
            updated_at: now,
        };

        data.schedules.insert(id, schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(&self, schedule: &Schedule) -> RepositoryResult<Schedule> {
        self.check_health()?;

        let mut data = self.data.write();
        let existing = data.schedules.get(&schedule.id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Schedule {} not found", schedule.id),
                ErrorContext::new("update_schedule")
                    .with_entity("schedule")
                    .with_entity_id(schedule.id),
            )
        })?;

        let mut updated = schedule.clone();
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        data.schedules.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn get_schedule(&self, id: ScheduleId) -> RepositoryResult<Schedule> {
        self.check_health()?;
        self.get_schedule_impl(id)
    }

    async fn list_schedules(&self) -> RepositoryResult<Vec<Schedule>> {
        self.check_health()?;
        let data = self.data.read();
        let mut schedules: Vec<Schedule> = data.schedules.values().cloned().collect();
        schedules.sort_by_key(|s| s.id);
        Ok(schedules)
    }

    async fn active_schedules_for_teacher(
        &self,
        teacher_id: TeacherId,
        day: DayOfWeek,
        term: &Term,
    ) -> RepositoryResult<Vec<Schedule>> {
        self.check_health()?;
        Ok(self.active_matching(|s| {
            s.teacher_id == teacher_id
                && s.day_of_week == day
                && s.academic_year == term.academic_year
                && s.semester == term.semester
        }))
    }

    async fn active_schedules_for_classroom(
        &self,
        classroom_id: ClassroomId,
        day: DayOfWeek,
        term: &Term,
    ) -> RepositoryResult<Vec<Schedule>> {
        self.check_health()?;
        Ok(self.active_matching(|s| {
            s.classroom_id == classroom_id
                && s.day_of_week == day
                && s.academic_year == term.academic_year
                && s.semester == term.semester
        }))
    }

    async fn active_schedules_for_day(&self, day: DayOfWeek) -> RepositoryResult<Vec<Schedule>> {
        self.check_health()?;
        Ok(self.active_matching(|s| s.day_of_week == day))
    }
}

#[async_trait]
impl ActivityRepository for LocalRepository {
    async fn insert_activity(
        &self,
        activity: &NewTeachingActivity,
    ) -> RepositoryResult<TeachingActivity> {
        self.check_health()?;

        if activity.start_time >= activity.end_time {
            return Err(RepositoryError::validation_with_context(
                format!(
                    "Activity start {} is not before end {}",
                    activity.start_time, activity.end_time
                ),
                ErrorContext::new("insert_activity").with_entity("activity"),
            ));
        }

        let mut data = self.data.write();

        if let Some(schedule_id) = activity.schedule_id {
            // The unique index is the ultimate authority against duplicate
            // generation, including concurrent runs.
            if !data.activity_index.insert((schedule_id, activity.date)) {
                return Err(RepositoryError::unique_violation_with_context(
                    format!(
                        "Activity for schedule {} on {} already exists",
                        schedule_id, activity.date
                    ),
                    ErrorContext::new("insert_activity")
                        .with_entity("activity")
                        .with_entity_id(schedule_id)
                        .with_details(format!("date={}", activity.date)),
                ));
            }
        }

        let id = ActivityId::new(data.next_activity_id);
        data.next_activity_id += 1;

        let now = Utc::now();
        let stored = TeachingActivity {
            id,
            schedule_id: activity.schedule_id,
            subject_id: activity.subject_id,
            teacher_id: activity.teacher_id,
            classroom_id: activity.classroom_id,
            date: activity.date,
            start_time: activity.start_time,
            end_time: activity.end_time,
            topic: activity.topic.clone(),
            is_completed: false,
            created_at: now,
            updated_at: now,
        };

        data.activities.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_activity(&self, id: ActivityId) -> RepositoryResult<TeachingActivity> {
        self.check_health()?;
        self.data.read().activities.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Activity {} not found", id),
                ErrorContext::new("get_activity")
                    .with_entity("activity")
                    .with_entity_id(id),
            )
        })
    }

    async fn activity_exists(
        &self,
        schedule_id: ScheduleId,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        self.check_health()?;
        Ok(self.data.read().activity_index.contains(&(schedule_id, date)))
    }

    async fn pending_activities(
        &self,
        teacher_id: TeacherId,
        page: PageRequest,
    ) -> RepositoryResult<Page<TeachingActivity>> {
        self.check_health()?;

        let data = self.data.read();
        let mut pending: Vec<TeachingActivity> = data
            .activities
            .values()
            .filter(|a| a.teacher_id == teacher_id && !a.is_completed)
            .cloned()
            .collect();

        // Newest sessions first: date descending, then start time descending.
        pending.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.start_time.cmp(&a.start_time))
                .then(a.id.cmp(&b.id))
        });

        let total = pending.len();
        let items: Vec<TeachingActivity> = pending
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .collect();

        Ok(Page {
            items,
            page: page.page,
            size: page.size,
            total,
        })
    }

    async fn set_completed(&self, id: ActivityId) -> RepositoryResult<TeachingActivity> {
        self.check_health()?;

        let mut data = self.data.write();
        let activity = data.activities.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Activity {} not found", id),
                ErrorContext::new("set_completed")
                    .with_entity("activity")
                    .with_entity_id(id),
            )
        })?;

        if !activity.is_completed {
            activity.is_completed = true;
            activity.updated_at = Utc::now();
        }
        Ok(activity.clone())
    }
}
