use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::task::Task;

/// On-disk shape of a task: one flat record per task, field by field.
///
/// Kept separate from [`Task`] so the model can evolve without silently
/// changing the store schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDateTime,
    pub duration: i64,
    pub color: String,
    pub icon: String,
    pub category: String,
    pub completed: bool,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            start: task.start,
            duration: task.duration_secs,
            color: task.color.clone(),
            icon: task.icon.clone(),
            category: task.category.clone(),
            completed: task.completed,
        }
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            start: record.start,
            duration_secs: record.duration.max(0),
            color: record.color,
            icon: record.icon,
            category: record.category,
            completed: record.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_task() -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap();
        let mut task = Task::new("Завтрак", start, 1800);
        task.color = "#30D158".into();
        task.icon = "emoji-food-symbolic".into();
        task.category = "Еда".into();
        task.completed = true;
        task
    }

    #[test]
    fn record_round_trip_preserves_every_field() {
        let task = sample_task();
        let json = serde_json::to_string(&TaskRecord::from(&task)).unwrap();
        let back: Task = serde_json::from_str::<TaskRecord>(&json).unwrap().into();

        assert_eq!(back.id, task.id);
        assert_eq!(back.title, task.title);
        assert_eq!(back.start, task.start);
        assert_eq!(back.duration_secs, task.duration_secs);
        assert_eq!(back.color, task.color);
        assert_eq!(back.icon, task.icon);
        assert_eq!(back.category, task.category);
        assert_eq!(back.completed, task.completed);
    }

    #[test]
    fn negative_stored_duration_is_clamped_on_load() {
        let mut record = TaskRecord::from(&sample_task());
        record.duration = -120;
        let task: Task = record.into();
        assert_eq!(task.duration_secs, 0);
    }
}
