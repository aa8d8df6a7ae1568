//! Database schema for sqlite-mcp

use rusqlite::Connection;

/// Create the `people` table if it does not exist yet
///
/// Runs at the start of every gateway call, so it must stay idempotent.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            profession TEXT NOT NULL
        );
        "#,
    )
}
