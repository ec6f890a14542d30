pub mod content;
pub mod content_type;
pub mod navigation;
pub mod term;

pub use content::{ContentItem, ContentStatus};
pub use content_type::ContentType;
pub use navigation::{LinkType, NavRecord, ResolvedNode, SelectOption};
pub use term::Term;
