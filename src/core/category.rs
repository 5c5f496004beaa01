use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task category: display name, arc color, and symbolic icon.
///
/// Names are expected to be unique but nothing enforces it. Deleting a
/// category leaves tasks that reference it untouched; they keep their copied
/// color and icon and a now-stale category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    /// Freedesktop symbolic icon name.
    pub icon: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// The four seed categories every fresh install starts with.
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("Еда", "#30D158", "emoji-food-symbolic"),
            Category::new("Спорт", "#FF453A", "emoji-activities-symbolic"),
            Category::new("Сон", "#0A84FF", "weather-clear-night-symbolic"),
            Category::new("Работа", "#FF9F0A", "computer-symbolic"),
        ]
    }
}

/// Icons offered by the category editor.
pub const AVAILABLE_ICONS: &[&str] = &[
    "emoji-food-symbolic",
    "emoji-activities-symbolic",
    "weather-clear-night-symbolic",
    "computer-symbolic",
    "user-home-symbolic",
    "applications-games-symbolic",
    "emblem-favorite-symbolic",
    "media-optical-symbolic",
    "accessories-text-editor-symbolic",
    "folder-music-symbolic",
    "system-users-symbolic",
    "weather-clear-symbolic",
    "starred-symbolic",
    "phone-symbolic",
    "mail-unread-symbolic",
    "preferences-system-symbolic",
];

/// Arc colors offered by the category editor.
pub const AVAILABLE_COLORS: &[&str] = &[
    "#30D158", "#FF453A", "#0A84FF", "#FF9F0A", "#BF5AF2", "#64D2FF", "#FFD60A", "#FF375F",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_four_distinct_categories() {
        let cats = Category::defaults();
        assert_eq!(cats.len(), 4);
        for (i, a) in cats.iter().enumerate() {
            for b in &cats[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }
}
