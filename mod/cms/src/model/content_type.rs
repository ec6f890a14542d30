use serde::{Deserialize, Serialize};

/// ContentType — a registered kind of content item.
/// Primary key is `key` (e.g. "page", "post").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// Type key — primary key, referenced by content items and ARCHIVE links.
    pub key: String,

    /// Human-readable name (e.g. "Pages").
    pub name: String,

    /// URL path segment used when building content URLs (e.g. "pages").
    pub url_segment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_json_roundtrip() {
        let t = ContentType {
            key: "page".into(),
            name: "Pages".into(),
            url_segment: "pages".into(),
            create_at: None,
            update_at: None,
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("urlSegment"));
        let back: ContentType = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
