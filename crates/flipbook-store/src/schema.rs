//! Database schema SQL.

/// Brochures, one row per generated brochure, keyed by a UUID.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS brochures (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    image_urls_json TEXT NOT NULL DEFAULT '[]',
    ai_response_json TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_brochures_owner ON brochures(owner_id, created_at);
"#;
