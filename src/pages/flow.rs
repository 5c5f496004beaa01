use std::collections::BTreeMap;

use chrono::NaiveDate;

use cosmic::iced::Length;
use cosmic::widget::{column, container, scrollable, text};
use cosmic::Element;

use crate::components::task_row::task_row;
use crate::config::SortOption;
use crate::core::task::Task;
use crate::message::Message;

/// The flat task list, grouped by day with the configured ordering inside
/// each day section.
pub fn flow_view(tasks: &[Task], sort: SortOption, today: NaiveDate) -> Element<'static, Message> {
    if tasks.is_empty() {
        return container(text::body("No tasks yet. Press the dial to add one."))
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill)
            .height(Length::Fill)
            .into();
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        by_day.entry(task.start.date()).or_default().push(task);
    }

    let mut content = column().spacing(8).padding(16);

    for (date, mut day_tasks) in by_day {
        match sort {
            SortOption::StartTime => day_tasks.sort_by_key(|t| t.start),
            SortOption::Title => day_tasks.sort_by(|a, b| a.title.cmp(&b.title)),
            SortOption::Category => {
                day_tasks.sort_by(|a, b| a.category.cmp(&b.category).then(a.start.cmp(&b.start)))
            }
        }

        let header = if date == today {
            format!("Today, {}", date.format("%A %b %e"))
        } else {
            date.format("%A, %b %e").to_string()
        };
        content = content.push(text::title4(header));

        for task in day_tasks {
            content = content.push(task_row(task));
        }
    }

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
