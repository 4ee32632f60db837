// ABOUTME: Category type definitions
// ABOUTME: Categories, their closed icon set and the built-in default categories

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display color used when none is given
pub const DEFAULT_COLOR: &str = "#6B7280";

/// Icons a category can carry. Anything outside this set renders as `Folder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryIcon {
    Briefcase,
    Home,
    Heart,
    GraduationCap,
    DollarSign,
    ShoppingCart,
    Plane,
    #[default]
    Folder,
}

impl CategoryIcon {
    /// Resolve an icon or default-category name, falling back to `Folder`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "briefcase" | "work" => CategoryIcon::Briefcase,
            "home" | "personal" => CategoryIcon::Home,
            "heart" | "health" => CategoryIcon::Heart,
            "graduation-cap" | "learning" => CategoryIcon::GraduationCap,
            "dollar-sign" | "finance" => CategoryIcon::DollarSign,
            "shopping-cart" | "shopping" => CategoryIcon::ShoppingCart,
            "plane" | "travel" => CategoryIcon::Plane,
            _ => CategoryIcon::Folder,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryIcon::Briefcase => "briefcase",
            CategoryIcon::Home => "home",
            CategoryIcon::Heart => "heart",
            CategoryIcon::GraduationCap => "graduation-cap",
            CategoryIcon::DollarSign => "dollar-sign",
            CategoryIcon::ShoppingCart => "shopping-cart",
            CategoryIcon::Plane => "plane",
            CategoryIcon::Folder => "folder",
        }
    }
}

impl From<String> for CategoryIcon {
    fn from(value: String) -> Self {
        CategoryIcon::from_name(&value)
    }
}

impl From<CategoryIcon> for String {
    fn from(icon: CategoryIcon) -> Self {
        icon.as_str().to_string()
    }
}

impl fmt::Display for CategoryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: CategoryIcon,
    pub created_at: DateTime<Utc>,
    pub task_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreateInput {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<CategoryIcon>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdateInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<CategoryIcon>,
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: CategoryIcon,
}

/// Seeded for a user on first use or on explicit request
pub const DEFAULT_CATEGORIES: [DefaultCategory; 7] = [
    DefaultCategory { name: "Work", color: "#3B82F6", icon: CategoryIcon::Briefcase },
    DefaultCategory { name: "Personal", color: "#10B981", icon: CategoryIcon::Home },
    DefaultCategory { name: "Health", color: "#EF4444", icon: CategoryIcon::Heart },
    DefaultCategory { name: "Learning", color: "#8B5CF6", icon: CategoryIcon::GraduationCap },
    DefaultCategory { name: "Finance", color: "#F59E0B", icon: CategoryIcon::DollarSign },
    DefaultCategory { name: "Shopping", color: "#EC4899", icon: CategoryIcon::ShoppingCart },
    DefaultCategory { name: "Travel", color: "#06B6D4", icon: CategoryIcon::Plane },
];

impl From<DefaultCategory> for CategoryCreateInput {
    fn from(default: DefaultCategory) -> Self {
        CategoryCreateInput {
            name: default.name.to_string(),
            color: Some(default.color.to_string()),
            icon: Some(default.icon),
        }
    }
}

/// Case-insensitive exact name lookup. The first match in slice order wins
/// when several categories differ only by case.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    categories.iter().find(|c| c.name.to_lowercase() == wanted)
}
