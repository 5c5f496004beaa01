use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::category::Category;

pub const CONFIG_VERSION: u64 = 1;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("dayring")
}

/// Task list ordering inside a day section.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SortOption {
    #[default]
    StartTime,
    Title,
    Category,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartTime => "Start time",
            Self::Title => "Title",
            Self::Category => "Category",
        }
    }

    pub const ALL: &'static [SortOption] = &[
        SortOption::StartTime,
        SortOption::Title,
        SortOption::Category,
    ];
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct DayringConfig {
    pub data_dir: PathBuf,
    /// Clock face fill for the light theme, `#RRGGBB`.
    pub face_color_light: String,
    /// Clock face fill for the dark theme, `#RRGGBB`.
    pub face_color_dark: String,
    pub notifications_enabled: bool,
    pub sort_option: SortOption,
    pub debug_logging: bool,
    /// The category set, serialized with the rest of the preferences.
    pub categories: Vec<Category>,
}

impl Default for DayringConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            face_color_light: "#FFFFFF".to_string(),
            face_color_dark: "#1C1C1E".to_string(),
            notifications_enabled: true,
            sort_option: SortOption::StartTime,
            debug_logging: false,
            categories: Category::defaults(),
        }
    }
}

impl DayringConfig {
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    pub fn export_path(&self) -> PathBuf {
        self.data_dir.join("export.csv")
    }

    /// Ensure the data directory exists.
    pub fn ensure_files(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
