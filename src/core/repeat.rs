use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// How often a repeating task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub const ALL: &'static [Frequency] = &[Frequency::Daily, Frequency::Weekly, Frequency::Monthly];
}

/// A repeat rule: frequency × number of instances.
///
/// The editor caps `count` at 30; the expansion itself is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPattern {
    pub frequency: Frequency,
    pub count: u32,
}

impl RepeatPattern {
    pub fn new(frequency: Frequency, count: u32) -> Self {
        Self { frequency, count }
    }

    /// Start time advanced by `steps` periods under calendar arithmetic.
    pub fn advance(&self, start: NaiveDateTime, steps: u32) -> NaiveDateTime {
        match self.frequency {
            Frequency::Daily => start + Duration::days(steps as i64),
            Frequency::Weekly => start + Duration::weeks(steps as i64),
            Frequency::Monthly => {
                let date = add_months(start.date(), steps);
                date.and_time(start.time())
            }
        }
    }
}

/// Expand a template into `pattern.count` instances.
///
/// Instance k is a copy of the template with a fresh id and the start
/// advanced by k periods; instance 0 keeps the template's start. No conflict
/// detection against existing tasks.
pub fn expand(template: &Task, pattern: RepeatPattern) -> Vec<Task> {
    (0..pattern.count)
        .map(|k| {
            let mut instance = template.clone();
            instance.id = Uuid::new_v4();
            instance.start = pattern.advance(template.start, k);
            instance
        })
        .collect()
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total_months = date.month0() + months;
    let new_year = date.year() + (total_months / 12) as i32;
    let new_month = (total_months % 12) + 1;
    // Clamp day to valid range for the new month
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    )
    .unwrap()
    .pred_opt()
    .unwrap()
    .day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(y: i32, mo: u32, d: u32, h: u32) -> Task {
        let start = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap();
        Task::new("Standup", start, 1800)
    }

    #[test]
    fn expand_produces_exactly_count_instances() {
        let t = template(2026, 2, 1, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Daily, 7));
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].start, t.start);
    }

    #[test]
    fn instances_get_fresh_ids() {
        let t = template(2026, 2, 1, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Weekly, 3));
        assert_ne!(out[0].id, t.id);
        assert_ne!(out[0].id, out[1].id);
        assert_ne!(out[1].id, out[2].id);
    }

    #[test]
    fn daily_steps_by_one_day() {
        let t = template(2026, 2, 27, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Daily, 3));
        assert_eq!(out[2].start.date(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(out[2].start.time(), t.start.time());
    }

    #[test]
    fn weekly_steps_by_seven_days() {
        let t = template(2026, 2, 1, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Weekly, 2));
        assert_eq!(out[1].start.date(), NaiveDate::from_ymd_opt(2026, 2, 8).unwrap());
    }

    #[test]
    fn monthly_from_jan_31_clamps_to_month_end() {
        let t = template(2026, 1, 31, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Monthly, 4));
        let dates: Vec<NaiveDate> = out.iter().map(|i| i.start.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            ]
        );
    }

    #[test]
    fn monthly_crosses_year_boundary() {
        let t = template(2026, 11, 15, 9);
        let out = expand(&t, RepeatPattern::new(Frequency::Monthly, 3));
        assert_eq!(out[2].start.date(), NaiveDate::from_ymd_opt(2027, 1, 15).unwrap());
    }

    #[test]
    fn instance_k_equals_instance_zero_advanced_k_periods() {
        let t = template(2026, 1, 31, 9);
        let pattern = RepeatPattern::new(Frequency::Monthly, 6);
        let out = expand(&t, pattern);
        for (k, instance) in out.iter().enumerate() {
            assert_eq!(instance.start, pattern.advance(out[0].start, k as u32));
        }
    }
}
