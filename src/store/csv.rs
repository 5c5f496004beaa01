use crate::core::task::Task;

/// CSV header, fixed by the export format the planner has always used.
pub const CSV_HEADER: &str = "Название,Категория,Начало,Продолжительность";

/// Render the task collection as CSV: header first, one row per task,
/// start times as `YYYY-MM-DD HH:MM:SS`, durations in seconds.
pub fn export_csv(tasks: &[Task]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for task in tasks {
        out.push_str(&field(&task.title));
        out.push(',');
        out.push_str(&field(&task.category));
        out.push(',');
        out.push_str(&task.start.format("%Y-%m-%d %H:%M:%S").to_string());
        out.push(',');
        out.push_str(&task.duration_secs.to_string());
        out.push('\n');
    }
    out
}

/// The format has no quoting, so commas and line breaks inside a field
/// would corrupt the row structure.
fn field(s: &str) -> String {
    s.replace(['\n', '\r', ','], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task_at(title: &str, h: u32, m: u32) -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        let mut task = Task::new(title, start, 3600);
        task.category = "Работа".into();
        task
    }

    #[test]
    fn header_plus_one_line_per_task() {
        let tasks = vec![task_at("Отчет", 9, 0), task_at("Встреча", 11, 30)];
        let csv = export_csv(&tasks);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Название,Категория,Начало,Продолжительность");
        assert_eq!(lines[1], "Отчет,Работа,2026-03-14 09:00:00,3600");
        assert_eq!(lines[2], "Встреча,Работа,2026-03-14 11:30:00,3600");
    }

    #[test]
    fn empty_collection_is_header_only() {
        let csv = export_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn commas_and_newlines_in_titles_do_not_break_rows() {
        let tasks = vec![task_at("Обед, потом\nпрогулка", 13, 0)];
        let csv = export_csv(&tasks);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("Обед  потом прогулка,"));
    }
}
