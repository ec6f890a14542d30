//! Navigation resolution engine.
//!
//! Turns the flat, self-referencing set of [`NavRecord`]s into an ordered
//! forest of fully resolved [`ResolvedNode`]s:
//!
//! ```text
//! flat records ─→ resolve each (resolver) ─→ link into forest (tree)
//!              ─→ sort siblings by (position, id) ─→ optionally prune
//! ```
//!
//! The engine is a stateless pure transformation over one snapshot of the
//! record set; destination existence checks go through the narrow lookup
//! traits in [`lookup`] so the whole thing runs against fixtures in tests.
//!
//! [`NavRecord`]: crate::model::NavRecord
//! [`ResolvedNode`]: crate::model::ResolvedNode

pub mod flatten;
pub mod lookup;
pub mod resolver;
pub mod tree;

pub use flatten::flatten_for_selection;
pub use lookup::{ContentLookup, ContentTypeRegistry, TargetRef, TermLookup};
pub use resolver::Resolver;
pub use tree::build_tree;
