use crate::model::{LinkType, NavRecord, ResolvedNode};

use super::lookup::{ContentLookup, ContentTypeRegistry, TermLookup};

/// Label substituted when a record's label is blank.
const FALLBACK_LABEL: &str = "Link";

/// Resolves single records into renderable nodes.
///
/// One existence lookup at most per record; children are never touched
/// here — linking is the tree builder's job.
pub struct Resolver<'a> {
    content: &'a dyn ContentLookup,
    terms: &'a dyn TermLookup,
    types: &'a dyn ContentTypeRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(
        content: &'a dyn ContentLookup,
        terms: &'a dyn TermLookup,
        types: &'a dyn ContentTypeRegistry,
    ) -> Self {
        Self { content, terms, types }
    }

    /// Resolve one record into a node with an empty children list.
    ///
    /// Never fails: an unresolvable destination yields `isValid = false`
    /// plus a diagnostic note instead of an error.
    pub fn resolve(&self, record: &NavRecord) -> ResolvedNode {
        let label = if record.label.trim().is_empty() {
            FALLBACK_LABEL.to_string()
        } else {
            record.label.clone()
        };

        let (url, note) = match self.resolve_url(record) {
            Ok(url) => (url, None),
            Err(note) => (String::new(), Some(note.to_string())),
        };

        ResolvedNode {
            id: record.id,
            label,
            link_type: record.link_type,
            parent_id: record.parent_id,
            position: record.position,
            open_in_new_tab: record.open_in_new_tab,
            is_valid: note.is_none(),
            url,
            note,
            children: Vec::new(),
        }
    }

    fn resolve_url(&self, record: &NavRecord) -> Result<String, &'static str> {
        match record.link_type {
            LinkType::Custom => {
                let url = record.url.as_deref().unwrap_or("").trim();
                if url.is_empty() {
                    return Err("missing destination URL");
                }
                Ok(url.to_string())
            }

            LinkType::Content => {
                let target_id = record.target_id.unwrap_or(0);
                if target_id <= 0 {
                    return Err("no content selected");
                }
                let target = self
                    .content
                    .find_published(target_id)
                    .ok_or("content not found")?;
                let segment = self
                    .types
                    .url_segment(&target.type_key)
                    .filter(|s| !s.is_empty())
                    .ok_or("content type not found")?;
                Ok(format!("/{}/{}", segment, target.slug))
            }

            LinkType::Term => {
                let target_id = record.target_id.unwrap_or(0);
                if target_id <= 0 {
                    return Err("no term selected");
                }
                let term = self.terms.find_term(target_id).ok_or("term not found")?;
                Ok(format!("/terms/{}/{}", term.type_key, term.slug))
            }

            LinkType::Archive => {
                let key = record.target_key.as_deref().unwrap_or("").trim();
                if key.is_empty() || !self.types.exists(key) {
                    return Err("content type not found");
                }
                let segment = self
                    .types
                    .url_segment(key)
                    .filter(|s| !s.is_empty())
                    .ok_or("content type not found")?;
                Ok(format!("/{segment}"))
            }

            LinkType::CoreHome => Ok("/".to_string()),
            LinkType::CoreLogin => Ok("/login".to_string()),
            LinkType::CoreRegister => Ok("/register".to_string()),
            LinkType::CoreSearch => Ok("/search".to_string()),
            LinkType::CoreProfile => Ok("/profile".to_string()),
            LinkType::CoreLogout => Ok("/logout".to_string()),

            LinkType::Unknown => Err("unsupported link type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::FixedLookups;
    use super::*;

    fn record(id: i64, link_type: LinkType) -> NavRecord {
        NavRecord {
            id,
            label: format!("entry {id}"),
            link_type,
            parent_id: None,
            position: 0,
            open_in_new_tab: false,
            url: None,
            target_id: None,
            target_key: None,
            create_at: None,
            update_at: None,
        }
    }

    fn lookups() -> FixedLookups {
        FixedLookups::default()
            .with_type("page", "pages")
            .with_type("post", "posts")
            .with_content(10, "page", "about-us")
            .with_term(20, "category", "news")
    }

    #[test]
    fn custom_uses_trimmed_url() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Custom);
        rec.url = Some("  /contact  ".into());

        let node = resolver.resolve(&rec);
        assert!(node.is_valid);
        assert_eq!(node.url, "/contact");
        assert_eq!(node.note, None);
    }

    #[test]
    fn custom_empty_url_fails() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Custom);
        rec.url = Some("   ".into());

        let node = resolver.resolve(&rec);
        assert!(!node.is_valid);
        assert_eq!(node.url, "");
        assert_eq!(node.note.as_deref(), Some("missing destination URL"));
    }

    #[test]
    fn content_builds_url_from_segment_and_slug() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Content);
        rec.target_id = Some(10);

        let node = resolver.resolve(&rec);
        assert!(node.is_valid);
        assert_eq!(node.url, "/pages/about-us");
    }

    #[test]
    fn content_without_target_fails() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);

        let mut rec = record(1, LinkType::Content);
        let node = resolver.resolve(&rec);
        assert_eq!(node.note.as_deref(), Some("no content selected"));

        rec.target_id = Some(0);
        let node = resolver.resolve(&rec);
        assert_eq!(node.note.as_deref(), Some("no content selected"));

        rec.target_id = Some(-5);
        let node = resolver.resolve(&rec);
        assert_eq!(node.note.as_deref(), Some("no content selected"));
    }

    #[test]
    fn content_lookup_miss_fails() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Content);
        rec.target_id = Some(999);

        let node = resolver.resolve(&rec);
        assert!(!node.is_valid);
        assert_eq!(node.note.as_deref(), Some("content not found"));
    }

    #[test]
    fn content_with_unregistered_type_fails() {
        // The item exists but its type key has no registered segment.
        let fx = FixedLookups::default().with_content(10, "gallery", "summer");
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Content);
        rec.target_id = Some(10);

        let node = resolver.resolve(&rec);
        assert_eq!(node.note.as_deref(), Some("content type not found"));
    }

    #[test]
    fn term_builds_url_from_type_and_slug() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Term);
        rec.target_id = Some(20);

        let node = resolver.resolve(&rec);
        assert!(node.is_valid);
        assert_eq!(node.url, "/terms/category/news");
    }

    #[test]
    fn term_failures() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);

        let mut rec = record(1, LinkType::Term);
        assert_eq!(resolver.resolve(&rec).note.as_deref(), Some("no term selected"));

        rec.target_id = Some(404);
        assert_eq!(resolver.resolve(&rec).note.as_deref(), Some("term not found"));
    }

    #[test]
    fn archive_resolves_registered_type() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::Archive);
        rec.target_key = Some("post".into());

        let node = resolver.resolve(&rec);
        assert!(node.is_valid);
        assert_eq!(node.url, "/posts");
    }

    #[test]
    fn archive_failures() {
        let fx = lookups();
        let resolver = Resolver::new(&fx, &fx, &fx);

        let mut rec = record(1, LinkType::Archive);
        assert_eq!(resolver.resolve(&rec).note.as_deref(), Some("content type not found"));

        rec.target_key = Some("".into());
        assert_eq!(resolver.resolve(&rec).note.as_deref(), Some("content type not found"));

        rec.target_key = Some("gallery".into());
        assert_eq!(resolver.resolve(&rec).note.as_deref(), Some("content type not found"));
    }

    #[test]
    fn core_pages_never_fail() {
        let fx = FixedLookups::default();
        let resolver = Resolver::new(&fx, &fx, &fx);

        let cases = [
            (LinkType::CoreHome, "/"),
            (LinkType::CoreLogin, "/login"),
            (LinkType::CoreRegister, "/register"),
            (LinkType::CoreSearch, "/search"),
            (LinkType::CoreProfile, "/profile"),
            (LinkType::CoreLogout, "/logout"),
        ];
        for (link_type, expected) in cases {
            let node = resolver.resolve(&record(1, link_type));
            assert!(node.is_valid, "{link_type} should always resolve");
            assert_eq!(node.url, expected);
            assert_eq!(node.note, None);
        }
    }

    #[test]
    fn core_home_ignores_stray_payload_fields() {
        let fx = FixedLookups::default();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::CoreHome);
        rec.url = Some("/ignored".into());
        rec.target_id = Some(999);
        rec.target_key = Some("ignored".into());

        let node = resolver.resolve(&rec);
        assert!(node.is_valid);
        assert_eq!(node.url, "/");
    }

    #[test]
    fn unknown_link_type_fails() {
        let fx = FixedLookups::default();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let node = resolver.resolve(&record(1, LinkType::Unknown));
        assert!(!node.is_valid);
        assert_eq!(node.note.as_deref(), Some("unsupported link type"));
    }

    #[test]
    fn blank_label_falls_back() {
        let fx = FixedLookups::default();
        let resolver = Resolver::new(&fx, &fx, &fx);
        let mut rec = record(1, LinkType::CoreHome);
        rec.label = "  ".into();

        assert_eq!(resolver.resolve(&rec).label, "Link");
    }
}
