//! Service layer: business logic over the repository and directory seams.
//!
//! - [`conflicts`]: interval-overlap conflict detection
//! - [`manager`]: validated, conflict-checked schedule writes
//! - [`generator`]: exactly-once expansion of schedules into dated activities
//! - [`activities`]: read-side activity queries and completion

pub mod activities;
pub mod conflicts;
pub mod generator;
pub mod manager;

pub use activities::{mark_completed, pending_activities};
pub use conflicts::{detect_conflicts, find_conflicts, overlaps};
pub use generator::{activity_from_schedule, generate_activities_for, DEFAULT_TOPIC};
pub use manager::{ScheduleManager, SchedulingError};
