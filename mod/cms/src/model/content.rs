use serde::{Deserialize, Serialize};

/// Publication state of a content item.
///
/// Only PUBLISHED items are reachable from navigation links; DRAFT items
/// exist solely for editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Draft,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            _ => None,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ContentItem — one piece of addressable content (a page, a post, ...).
///
/// `id` is assigned by SQLite on insert and is what navigation CONTENT
/// links reference. Deleted items keep their row (soft delete) so that
/// dangling links stay diagnosable, but are invisible to list and lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: i64,

    /// Key of the content type this item belongs to.
    pub type_key: String,

    /// URL slug, unique among live items of the same type.
    pub slug: String,

    pub title: String,

    /// Body markup; opaque to this system.
    #[serde(default)]
    pub body: String,

    pub status: ContentStatus,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}
