//! Event categories and their presentation table.
//!
//! Every category maps to exactly one label and one color through
//! [`CATEGORY_STYLES`]. Adding a category means adding a variant and a row
//! to that table; nothing else dispatches on the variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meeting,
    Personal,
    Holiday,
    Reminder,
    Other,
}

/// Presentation tag derived from a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Blue,
    Purple,
    Red,
    Yellow,
    Gray,
}

/// One row of the category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub category: Category,
    pub label: &'static str,
    pub color: CategoryColor,
}

/// Indexed by `Category as usize`; rows must stay in declaration order.
pub const CATEGORY_STYLES: [CategoryStyle; 5] = [
    CategoryStyle {
        category: Category::Meeting,
        label: "Meeting",
        color: CategoryColor::Blue,
    },
    CategoryStyle {
        category: Category::Personal,
        label: "Personal",
        color: CategoryColor::Purple,
    },
    CategoryStyle {
        category: Category::Holiday,
        label: "Holiday",
        color: CategoryColor::Red,
    },
    CategoryStyle {
        category: Category::Reminder,
        label: "Reminder",
        color: CategoryColor::Yellow,
    },
    CategoryStyle {
        category: Category::Other,
        label: "Other",
        color: CategoryColor::Gray,
    },
];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Meeting,
        Category::Personal,
        Category::Holiday,
        Category::Reminder,
        Category::Other,
    ];

    pub fn style(self) -> &'static CategoryStyle {
        &CATEGORY_STYLES[self as usize]
    }

    pub fn color(self) -> CategoryColor {
        self.style().color
    }

    /// Human-readable label, e.g. "Meeting"
    pub fn label(self) -> &'static str {
        self.style().label
    }

    /// Lowercase identifier used in storage and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Meeting => "meeting",
            Category::Personal => "personal",
            Category::Holiday => "holiday",
            Category::Reminder => "reminder",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                let known: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

impl CategoryColor {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryColor::Blue => "blue",
            CategoryColor::Purple => "purple",
            CategoryColor::Red => "red",
            CategoryColor::Yellow => "yellow",
            CategoryColor::Gray => "gray",
        }
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
