use serde::{Deserialize, Serialize};

/// Term — one taxonomy term (a category, a tag, ...).
///
/// `typeKey` names the taxonomy and flows verbatim into the term's URL
/// (`/terms/{typeKey}/{slug}`); there is no separate taxonomy registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: i64,

    /// Taxonomy the term belongs to (e.g. "category", "tag").
    pub type_key: String,

    /// URL slug, unique within the taxonomy.
    pub slug: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}
