use opencms_core::ServiceError;
use opencms_sql::SQLStore;

/// SQL DDL for the CMS tables.
///
/// Each table stores the full JSON document in a `data` TEXT column, with
/// indexed columns extracted for filtering and uniqueness. Content and
/// term ids are INTEGER PRIMARY KEYs because navigation records reference
/// them by integer `targetId`.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS content_types (
        key TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        name TEXT,
        url_segment TEXT NOT NULL,
        create_at TEXT,
        update_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS contents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        data TEXT NOT NULL DEFAULT '{}',
        type_key TEXT NOT NULL,
        slug TEXT NOT NULL,
        status TEXT NOT NULL,
        deleted INTEGER NOT NULL DEFAULT 0,
        create_at TEXT,
        update_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS terms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        data TEXT NOT NULL DEFAULT '{}',
        type_key TEXT NOT NULL,
        slug TEXT NOT NULL,
        create_at TEXT,
        update_at TEXT,
        UNIQUE(type_key, slug)
    )",
    // Indexes
    "CREATE INDEX IF NOT EXISTS idx_content_type ON contents(type_key)",
    "CREATE INDEX IF NOT EXISTS idx_content_status ON contents(status)",
    // Slug uniqueness only applies to live rows; soft-deleted items may
    // leave their slug behind for reuse.
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_content_slug
        ON contents(type_key, slug) WHERE deleted = 0",
    "CREATE INDEX IF NOT EXISTS idx_term_type ON terms(type_key)",
];

pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for stmt in SCHEMA {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init failed: {e}")))?;
    }
    Ok(())
}
