use chrono::{Datelike, Duration, NaiveDate};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, progress_bar, row, scrollable, text};
use cosmic::Element;

use crate::core::category::Category;
use crate::core::task::Task;
use crate::message::{Message, StatsRange};

/// Per-category time totals over a day, week, or month window.
pub fn statistics_view(
    tasks: &[Task],
    categories: &[Category],
    range: StatsRange,
    today: NaiveDate,
) -> Element<'static, Message> {
    let mut range_row = row().spacing(4);
    for r in StatsRange::ALL {
        let btn = if *r == range {
            button::suggested(r.label())
        } else {
            button::standard(r.label())
        };
        range_row = range_row.push(btn.on_press(Message::SetStatsRange(*r)));
    }

    let (from, to) = window(range, today);
    let in_window: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.start.date() >= from && t.start.date() <= to)
        .collect();

    let mut content = column()
        .spacing(12)
        .padding(16)
        .push(range_row)
        .push(text::caption(format!(
            "{} – {}",
            from.format("%e %b %Y"),
            to.format("%e %b %Y")
        )));

    if in_window.is_empty() {
        content = content.push(
            container(text::body("Nothing planned in this period."))
                .padding(32)
                .center_x(Length::Fill),
        );
        return scrollable(content).width(Length::Fill).height(Length::Fill).into();
    }

    let completed = in_window.iter().filter(|t| t.completed).count();
    content = content.push(text::body(format!(
        "{} tasks, {} completed",
        in_window.len(),
        completed
    )));

    // One bar per category, scaled against the busiest one. Tasks whose
    // category has been deleted are grouped under their stale name tag.
    let mut totals: Vec<(String, i64)> = Vec::new();
    for category in categories {
        let secs: i64 = in_window
            .iter()
            .filter(|t| t.category == category.name)
            .map(|t| t.duration_secs)
            .sum();
        totals.push((category.name.clone(), secs));
    }
    for task in &in_window {
        if !categories.iter().any(|c| c.name == task.category) {
            match totals.iter_mut().find(|(name, _)| *name == task.category) {
                Some((_, secs)) => *secs += task.duration_secs,
                None => totals.push((task.category.clone(), task.duration_secs)),
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    let max_secs = totals.iter().map(|(_, s)| *s).max().unwrap_or(0).max(1);

    for (name, secs) in totals {
        if secs == 0 {
            continue;
        }
        let hours = secs as f32 / 3600.0;
        content = content.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text::body(name).width(Length::Fixed(120.0)))
                .push(
                    progress_bar(0.0..=max_secs as f32, secs as f32)
                        .height(Length::Fixed(8.0))
                        .width(Length::Fill),
                )
                .push(text::caption(format!("{:.1} h", hours)).width(Length::Fixed(56.0))),
        );
    }

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Inclusive date window for a range anchored on `today`: the day itself,
/// its Monday-based week, or its calendar month.
fn window(range: StatsRange, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match range {
        StatsRange::Day => (today, today),
        StatsRange::Week => {
            let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            (monday, monday + Duration::days(6))
        }
        StatsRange::Month => {
            let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
            let last = first
                .checked_add_months(chrono::Months::new(1))
                .and_then(|d| d.pred_opt())
                .unwrap_or(today);
            (first, last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_window_runs_monday_to_sunday() {
        // 2026-03-14 is a Saturday
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let (from, to) = window(StatsRange::Week, today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
    }

    #[test]
    fn month_window_covers_the_whole_month() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let (from, to) = window(StatsRange::Month, today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn day_window_is_the_single_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(window(StatsRange::Day, today), (today, today));
    }
}
