use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-boxed task placed on the 24-hour dial.
///
/// Color and icon are copied from the category when the task is created or
/// edited; the category itself is referenced by its display name tag, which
/// is what the persisted record stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDateTime,
    /// Duration in seconds, never negative.
    pub duration_secs: i64,
    /// `#RRGGBB`
    pub color: String,
    pub icon: String,
    /// Category display name tag.
    pub category: String,
    pub completed: bool,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Task {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, duration_secs: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            duration_secs: duration_secs.max(0),
            color: String::new(),
            icon: String::new(),
            category: String::new(),
            completed: false,
        }
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.start + Duration::seconds(self.duration_secs)
    }

    /// Clamp a resize to a non-negative duration.
    pub fn set_duration(&mut self, secs: i64) {
        self.duration_secs = secs.max(0);
    }

    pub fn is_on_day(&self, day: NaiveDate) -> bool {
        self.start.date() == day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn end_time_is_start_plus_duration() {
        let task = Task::new("Lunch", at(13, 0), 3600);
        assert_eq!(task.end_time(), at(14, 0));
    }

    #[test]
    fn duration_never_negative() {
        let mut task = Task::new("Nap", at(15, 0), -60);
        assert_eq!(task.duration_secs, 0);
        task.set_duration(-3600);
        assert_eq!(task.duration_secs, 0);
        assert_eq!(task.end_time(), task.start);
    }

    #[test]
    fn equality_is_by_id() {
        let a = Task::new("One", at(8, 0), 1800);
        let mut b = a.clone();
        b.title = "Renamed".into();
        assert_eq!(a, b);

        let c = Task::new("One", at(8, 0), 1800);
        assert_ne!(a, c);
    }
}
