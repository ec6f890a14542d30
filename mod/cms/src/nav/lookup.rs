//! Lookup interfaces the resolver calls out to.
//!
//! Kept deliberately narrow: the engine only ever needs an existence check
//! plus the two strings that go into a URL. Implementations must be
//! side-effect-free; a backend failure is reported as `None` and the
//! engine treats it the same as "target not found".

/// The URL-relevant identity of a resolved destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub type_key: String,
    pub slug: String,
}

/// Looks up content items for CONTENT links.
pub trait ContentLookup: Send + Sync {
    /// Find an existing, published, non-deleted content item by id.
    fn find_published(&self, id: i64) -> Option<TargetRef>;
}

/// Looks up taxonomy terms for TERM links.
pub trait TermLookup: Send + Sync {
    /// Find an existing term by id.
    fn find_term(&self, id: i64) -> Option<TargetRef>;
}

/// Registry of content types, for CONTENT URLs and ARCHIVE links.
pub trait ContentTypeRegistry: Send + Sync {
    /// The URL path segment registered for a type key.
    fn url_segment(&self, key: &str) -> Option<String>;

    /// Whether a type key is currently registered.
    fn exists(&self, key: &str) -> bool;
}
