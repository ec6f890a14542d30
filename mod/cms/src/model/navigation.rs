use serde::{Deserialize, Serialize};

/// How a navigation entry's destination is computed.
///
/// The set is closed: each variant has exactly one resolution rule (see
/// `nav::resolver`). Stored values that match none of the known names
/// deserialize to `Unknown`, which never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    /// Free-form URL entered by an editor.
    Custom,
    /// A published content item, referenced by `targetId`.
    Content,
    /// A taxonomy term, referenced by `targetId`.
    Term,
    /// The archive listing of a content type, referenced by `targetKey`.
    Archive,
    CoreHome,
    CoreLogin,
    CoreRegister,
    CoreSearch,
    CoreProfile,
    CoreLogout,
    /// Unrecognized stored value.
    #[serde(other)]
    Unknown,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "CUSTOM",
            Self::Content => "CONTENT",
            Self::Term => "TERM",
            Self::Archive => "ARCHIVE",
            Self::CoreHome => "CORE_HOME",
            Self::CoreLogin => "CORE_LOGIN",
            Self::CoreRegister => "CORE_REGISTER",
            Self::CoreSearch => "CORE_SEARCH",
            Self::CoreProfile => "CORE_PROFILE",
            Self::CoreLogout => "CORE_LOGOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NavRecord — one persisted flat navigation entry.
///
/// Records form a forest through `parentId`; nothing enforces that the
/// reference resolves or that chains are acyclic. The engine interprets
/// broken references leniently (see `nav::tree`).
///
/// Exactly one of `url` / `targetId` / `targetKey` is meaningful for a
/// given `linkType`; the others are expected to be null and are never read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavRecord {
    /// Unique positive integer, immutable once created.
    pub id: i64,

    /// Display text; may be empty at rest (rendering falls back to "Link").
    #[serde(default)]
    pub label: String,

    pub link_type: LinkType,

    /// Parent record id; null means top-level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,

    /// Ordering key among siblings; ties break on id.
    #[serde(default)]
    pub position: i64,

    /// Display hint, opaque to resolution.
    #[serde(default)]
    pub open_in_new_tab: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

/// ResolvedNode — a fully computed, renderable navigation tree element.
///
/// Built fresh on every resolution pass; never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub id: i64,

    /// Display label, never empty ("Link" when the record's label is blank).
    pub label: String,

    pub link_type: LinkType,

    /// The record's parent reference as stored, even when the node was
    /// promoted to top-level because the reference did not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,

    pub position: i64,

    pub open_in_new_tab: bool,

    /// Resolved absolute path; empty exactly when `isValid` is false.
    pub url: String,

    pub is_valid: bool,

    /// Why resolution failed; present exactly when `isValid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Ordered children, sorted by (position, id).
    pub children: Vec<ResolvedNode>,
}

/// One entry of the flattened "choose a parent" selection list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub id: i64,
    /// Label prefixed with one depth marker per tree level.
    pub label: String,
}
