pub mod clock_face;
pub mod month_calendar;
pub mod task_row;
