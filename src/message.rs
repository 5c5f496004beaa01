use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::config::SortOption;
use crate::core::repeat::Frequency;

/// Statistics time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    Day,
    Week,
    Month,
}

impl StatsRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    pub const ALL: &'static [StatsRange] = &[StatsRange::Day, StatsRange::Week, StatsRange::Month];
}

#[derive(Debug, Clone)]
pub enum Message {
    // Clock
    Tick(NaiveDateTime),
    SelectCategory(Uuid),
    CreateTaskAt(NaiveTime),
    TaskMoved(Uuid, NaiveTime),
    TaskResized(Uuid, i64),
    DragEnded,

    // Task CRUD
    ToggleTaskCompleted(Uuid),
    DeleteTask(Uuid),
    EditTask(Uuid),

    // Task form (context drawer)
    OpenNewTaskForm,
    CloseTaskForm,
    FormTitle(String),
    FormDate(String),
    FormTime(String),
    FormDurationPreset(i64),
    FormDurationMinutes(String),
    FormCategory(usize),
    FormIcon(usize),
    FormRepeatToggle(bool),
    FormRepeatFrequency(Frequency),
    FormRepeatCount(String),
    FormSubmit,

    // Categories
    CategoryNameInput(String),
    CategoryColorPick(usize),
    CategoryIconPick(usize),
    CategorySubmit,
    DeleteCategory(Uuid),
    MoveCategory(Uuid, isize),

    // Calendar
    CalendarPrevMonth,
    CalendarNextMonth,
    CalendarSelectDay(NaiveDate),

    // Statistics
    SetStatsRange(StatsRange),

    // Search
    SearchQueryChanged(String),

    // Settings
    OpenSettings,
    ToggleNotifications,
    SetSortOption(SortOption),
    SetFaceColorLight(String),
    SetFaceColorDark(String),
    ToggleDebugLogging,
    ResetSettings,
    ExportCsv,
    CsvExported(Result<String, String>),

    // Persistence
    SaveTick(u64),
    Saved(Result<(), String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Clock,
    Flow,
    Calendar,
    Statistics,
    Categories,
    Settings,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Clock => "Clock",
            Self::Flow => "Task Flow",
            Self::Calendar => "Calendar",
            Self::Statistics => "Statistics",
            Self::Categories => "Categories",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clock => "preferences-system-time-symbolic",
            Self::Flow => "view-list-symbolic",
            Self::Calendar => "x-office-calendar-symbolic",
            Self::Statistics => "utilities-system-monitor-symbolic",
            Self::Categories => "view-grid-symbolic",
            Self::Settings => "emblem-system-symbolic",
        }
    }

    pub const ALL: &'static [Page] = &[
        // Planning
        Page::Clock,
        Page::Flow,
        Page::Calendar,
        Page::Statistics,
        // Configuration
        Page::Categories,
        Page::Settings,
    ];

    /// Pages that start a new sidebar section (divider drawn above them).
    pub const SECTION_STARTS: &'static [Page] = &[Page::Categories];
}
