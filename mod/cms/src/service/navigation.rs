use serde::Deserialize;

use opencms_core::{now_rfc3339, ServiceError};
use opencms_sql::Value;

use crate::model::{ContentStatus, LinkType, NavRecord, ResolvedNode, SelectOption};
use crate::nav::{self, ContentLookup, ContentTypeRegistry, Resolver, TargetRef, TermLookup};

use super::CmsService;

/// Fields accepted when creating a navigation record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNavItem {
    #[serde(default)]
    pub label: String,
    pub link_type: LinkType,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub open_in_new_tab: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub target_key: Option<String>,
}

impl CmsService {
    /// Create a navigation record.
    ///
    /// The parent reference is deliberately not validated: a dangling or
    /// since-deleted parent only means the entry renders at top level.
    /// Destination existence is likewise checked at resolution time, not
    /// here — editors may link content they publish later.
    pub fn create_nav_item(&self, req: NewNavItem) -> Result<NavRecord, ServiceError> {
        if req.link_type == LinkType::Unknown {
            return Err(ServiceError::Validation("unsupported link type".into()));
        }
        let position = req.position.unwrap_or(0);
        if position < 0 {
            return Err(ServiceError::Validation("position must be non-negative".into()));
        }

        let now = now_rfc3339();
        let record = NavRecord {
            id: self.nav.next_id()?,
            label: req.label,
            link_type: req.link_type,
            parent_id: req.parent_id,
            position,
            open_in_new_tab: req.open_in_new_tab,
            url: req.url,
            target_id: req.target_id,
            target_key: req.target_key,
            create_at: Some(now.clone()),
            update_at: Some(now),
        };
        self.nav.save(&record)?;
        Ok(record)
    }

    pub fn get_nav_item(&self, id: i64) -> Result<NavRecord, ServiceError> {
        self.nav.get(id)
    }

    /// Flat listing of all records, in (position, id) order.
    pub fn list_nav_items(&self) -> Result<Vec<NavRecord>, ServiceError> {
        let mut records = self.nav.list_all()?;
        records.sort_by_key(|r| (r.position, r.id));
        Ok(records)
    }

    pub fn update_nav_item(
        &self,
        id: i64,
        patch: serde_json::Value,
    ) -> Result<NavRecord, ServiceError> {
        let current = self.nav.get(id)?;
        let updated: NavRecord = Self::apply_patch(&current, patch, &["id"])?;

        if updated.link_type == LinkType::Unknown {
            return Err(ServiceError::Validation("unsupported link type".into()));
        }
        if updated.position < 0 {
            return Err(ServiceError::Validation("position must be non-negative".into()));
        }

        self.nav.save(&updated)?;
        Ok(updated)
    }

    /// Delete a record. Children keep their `parentId` and surface as
    /// top-level entries on the next build.
    pub fn delete_nav_item(&self, id: i64) -> Result<(), ServiceError> {
        self.nav.delete(id)
    }

    /// Resolve the full navigation forest from a fresh snapshot.
    pub fn build_tree(&self, prune_invalid: bool) -> Result<Vec<ResolvedNode>, ServiceError> {
        let records = self.nav.list_all()?;
        let resolver = Resolver::new(self, self, self);
        Ok(nav::build_tree(&records, &resolver, prune_invalid))
    }

    /// The indented "choose a parent" list, built from the unpruned tree.
    pub fn flatten_for_selection(&self) -> Result<Vec<SelectOption>, ServiceError> {
        Ok(nav::flatten_for_selection(&self.build_tree(false)?))
    }
}

// ── Engine lookups, backed by the SQL tables ──
//
// Store failures surface as None: the engine flags the single record as
// unresolved instead of failing the whole build.

impl ContentLookup for CmsService {
    fn find_published(&self, id: i64) -> Option<TargetRef> {
        let rows = self
            .sql
            .query(
                "SELECT type_key, slug FROM contents \
                 WHERE id = ?1 AND status = ?2 AND deleted = 0",
                &[
                    Value::Integer(id),
                    Value::Text(ContentStatus::Published.as_str().to_string()),
                ],
            )
            .ok()?;
        let row = rows.first()?;
        Some(TargetRef {
            type_key: row.get_str("type_key")?.to_string(),
            slug: row.get_str("slug")?.to_string(),
        })
    }
}

impl TermLookup for CmsService {
    fn find_term(&self, id: i64) -> Option<TargetRef> {
        let rows = self
            .sql
            .query(
                "SELECT type_key, slug FROM terms WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .ok()?;
        let row = rows.first()?;
        Some(TargetRef {
            type_key: row.get_str("type_key")?.to_string(),
            slug: row.get_str("slug")?.to_string(),
        })
    }
}

impl ContentTypeRegistry for CmsService {
    fn url_segment(&self, key: &str) -> Option<String> {
        let rows = self
            .sql
            .query(
                "SELECT url_segment FROM content_types WHERE key = ?1",
                &[Value::Text(key.to_string())],
            )
            .ok()?;
        Some(rows.first()?.get_str("url_segment")?.to_string())
    }

    fn exists(&self, key: &str) -> bool {
        self.url_segment(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::make_service;
    use super::*;

    fn new_item(label: &str, link_type: LinkType) -> NewNavItem {
        NewNavItem {
            label: label.into(),
            link_type,
            parent_id: None,
            position: None,
            open_in_new_tab: false,
            url: None,
            target_id: None,
            target_key: None,
        }
    }

    #[test]
    fn create_assigns_ids_and_defaults() {
        let (_dir, svc) = make_service();
        let home = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();
        assert_eq!(home.id, 1);
        assert_eq!(home.position, 0);
        assert_eq!(svc.create_nav_item(new_item("Search", LinkType::CoreSearch)).unwrap().id, 2);
    }

    #[test]
    fn create_rejects_unknown_type_and_negative_position() {
        let (_dir, svc) = make_service();

        let from_wire: NewNavItem =
            serde_json::from_str("{\"label\":\"x\",\"linkType\":\"BOGUS\"}").unwrap();
        assert!(matches!(
            svc.create_nav_item(from_wire),
            Err(ServiceError::Validation(_))
        ));

        let mut negative = new_item("x", LinkType::CoreHome);
        negative.position = Some(-1);
        assert!(matches!(
            svc.create_nav_item(negative),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn update_protects_id_and_revalidates() {
        let (_dir, svc) = make_service();
        let item = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();

        let updated = svc
            .update_nav_item(item.id, serde_json::json!({"id": 99, "label": "Start"}))
            .unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.label, "Start");

        assert!(matches!(
            svc.update_nav_item(item.id, serde_json::json!({"position": -2})),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.update_nav_item(item.id, serde_json::json!({"linkType": "BOGUS"})),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn list_is_flat_and_ordered() {
        let (_dir, svc) = make_service();
        let mut late = new_item("Late", LinkType::CoreHome);
        late.position = Some(5);
        svc.create_nav_item(late).unwrap();
        svc.create_nav_item(new_item("Early", LinkType::CoreSearch)).unwrap();

        let labels: Vec<String> = svc
            .list_nav_items()
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["Early", "Late"]);
    }

    #[test]
    fn tree_resolves_against_real_stores() {
        let (_dir, svc) = make_service();
        svc.create_type("page".into(), "Pages".into(), "pages".into()).unwrap();
        let about = svc
            .create_content("page".into(), "about".into(), "About".into(), String::new(), None)
            .unwrap();
        svc.publish_content(about.id).unwrap();
        let news = svc.create_term("category".into(), "news".into(), "News".into()).unwrap();

        let home = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();

        let mut content_link = new_item("About", LinkType::Content);
        content_link.parent_id = Some(home.id);
        content_link.target_id = Some(about.id);
        svc.create_nav_item(content_link).unwrap();

        let mut term_link = new_item("News", LinkType::Term);
        term_link.parent_id = Some(home.id);
        term_link.position = Some(1);
        term_link.target_id = Some(news.id);
        svc.create_nav_item(term_link).unwrap();

        let mut archive_link = new_item("All pages", LinkType::Archive);
        archive_link.parent_id = Some(home.id);
        archive_link.position = Some(2);
        archive_link.target_key = Some("page".into());
        svc.create_nav_item(archive_link).unwrap();

        let forest = svc.build_tree(false).unwrap();
        assert_eq!(forest.len(), 1);
        let urls: Vec<&str> = forest[0].children.iter().map(|n| n.url.as_str()).collect();
        assert_eq!(urls, vec!["/pages/about", "/terms/category/news", "/pages"]);
        assert!(forest[0].children.iter().all(|n| n.is_valid));
    }

    #[test]
    fn draft_and_deleted_content_are_invisible_to_links() {
        let (_dir, svc) = make_service();
        svc.create_type("page".into(), "Pages".into(), "pages".into()).unwrap();
        let draft = svc
            .create_content("page".into(), "draft".into(), "Draft".into(), String::new(), None)
            .unwrap();

        let mut link = new_item("Draft", LinkType::Content);
        link.target_id = Some(draft.id);
        svc.create_nav_item(link).unwrap();

        let forest = svc.build_tree(false).unwrap();
        assert!(!forest[0].is_valid);
        assert_eq!(forest[0].note.as_deref(), Some("content not found"));

        // Publishing makes the same record resolve on the next pass.
        svc.publish_content(draft.id).unwrap();
        let forest = svc.build_tree(false).unwrap();
        assert!(forest[0].is_valid);
        assert_eq!(forest[0].url, "/pages/draft");

        // Soft-deleting hides it again.
        svc.delete_content(draft.id).unwrap();
        let forest = svc.build_tree(false).unwrap();
        assert_eq!(forest[0].note.as_deref(), Some("content not found"));
    }

    #[test]
    fn pruned_tree_over_real_stores() {
        let (_dir, svc) = make_service();
        let home = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();

        let mut broken = new_item("Broken", LinkType::Custom);
        broken.parent_id = Some(home.id);
        broken.url = Some(String::new());
        svc.create_nav_item(broken).unwrap();

        let mut ok = new_item("Docs", LinkType::Custom);
        ok.parent_id = Some(home.id);
        ok.position = Some(1);
        ok.url = Some("/docs".into());
        svc.create_nav_item(ok).unwrap();

        let pruned = svc.build_tree(true).unwrap();
        assert_eq!(pruned.len(), 1);
        let labels: Vec<&str> = pruned[0].children.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Docs"]);
    }

    #[test]
    fn selection_list_spans_depths() {
        let (_dir, svc) = make_service();
        let home = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();
        let mut child = new_item("Team", LinkType::Custom);
        child.parent_id = Some(home.id);
        child.url = Some("/team".into());
        let child = svc.create_nav_item(child).unwrap();
        let mut grandchild = new_item("Alumni", LinkType::Custom);
        grandchild.parent_id = Some(child.id);
        grandchild.url = Some("/team/alumni".into());
        svc.create_nav_item(grandchild).unwrap();

        let labels: Vec<String> = svc
            .flatten_for_selection()
            .unwrap()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Home", "— Team", "— — Alumni"]);
    }

    #[test]
    fn deleting_a_parent_promotes_children() {
        let (_dir, svc) = make_service();
        let home = svc.create_nav_item(new_item("Home", LinkType::CoreHome)).unwrap();
        let mut child = new_item("Docs", LinkType::Custom);
        child.parent_id = Some(home.id);
        child.url = Some("/docs".into());
        let child = svc.create_nav_item(child).unwrap();

        svc.delete_nav_item(home.id).unwrap();

        let forest = svc.build_tree(false).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, child.id);
        // The stale reference is preserved on the node.
        assert_eq!(forest[0].parent_id, Some(home.id));
    }
}
