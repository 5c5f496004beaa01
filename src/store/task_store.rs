use std::path::PathBuf;

use thiserror::Error;

use super::record::TaskRecord;
use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read task store: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write task store: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("task store is not a JSON array: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// JSON-file store holding the full task collection.
///
/// Every save rewrites the whole file; every load reads the whole file.
/// Records that fail to decode are dropped with a warning and loading
/// continues — one corrupt entry does not take the planner down.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load all tasks. A missing file is an empty store; an unreadable or
    /// structurally broken file is an error the caller treats as fatal.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };
        decode_tasks(&content)
    }

    /// Persist the full collection, replacing whatever was on disk.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        let json = serde_json::to_string_pretty(&records).map_err(StoreError::Serialize)?;
        std::fs::write(&self.path, json).map_err(StoreError::Write)
    }
}

/// Decode a store file body, skipping records that fail individually.
fn decode_tasks(content: &str) -> Result<Vec<Task>, StoreError> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(StoreError::Malformed)?;

    let mut tasks = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<TaskRecord>(value) {
            Ok(record) => tasks.push(record.into()),
            Err(e) => log::warn!("Skipping undecodable task record: {}", e),
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_task(title: &str) -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut task = Task::new(title, start, 3600);
        task.color = "#FF9F0A".into();
        task.icon = "computer-symbolic".into();
        task.category = "Работа".into();
        task
    }

    fn temp_store() -> TaskStore {
        let path = std::env::temp_dir().join(format!("dayring-test-{}.json", uuid::Uuid::new_v4()));
        TaskStore::new(path)
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let store = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store();
        let tasks = vec![sample_task("Отчет"), sample_task("Встреча")];
        store.save(&tasks).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, tasks[0].id);
        assert_eq!(loaded[1].title, "Встреча");

        std::fs::remove_file(store.path()).unwrap();
    }

    #[test]
    fn bad_record_is_skipped_and_the_rest_survive() {
        let good = serde_json::to_value(super::super::record::TaskRecord::from(&sample_task(
            "Уцелевшая",
        )))
        .unwrap();
        let content = format!(
            "[{}, {{\"id\": \"not-a-uuid\", \"title\": 42}}, {}]",
            good,
            serde_json::to_value(super::super::record::TaskRecord::from(&sample_task("Вторая")))
                .unwrap()
        );

        let tasks = decode_tasks(&content).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Уцелевшая");
        assert_eq!(tasks[1].title, "Вторая");
    }

    #[test]
    fn non_array_store_is_an_error() {
        assert!(matches!(
            decode_tasks("{\"oops\": true}"),
            Err(StoreError::Malformed(_))
        ));
    }
}
