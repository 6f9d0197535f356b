use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (catalog schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT,
                username    TEXT NOT NULL UNIQUE,
                bio         TEXT,
                verified    INTEGER NOT NULL DEFAULT 0,
                links       TEXT,
                avatar      TEXT
            );

            CREATE TABLE categories (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL UNIQUE,
                icon        TEXT NOT NULL,
                parent_id   INTEGER REFERENCES categories(id)
            );

            CREATE TABLE templates (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                description     TEXT,
                created_at      TEXT NOT NULL,
                total_views     INTEGER NOT NULL DEFAULT 0,
                recent_views    INTEGER NOT NULL DEFAULT 0,
                price           REAL,
                purchase_url    TEXT,
                user_id         INTEGER NOT NULL REFERENCES users(id),
                last_updated_by INTEGER REFERENCES users(id),
                workflow_data   TEXT,
                workflow_info   TEXT,
                nodes_data      TEXT,
                image_data      TEXT
            );

            CREATE TABLE template_categories (
                template_id INTEGER NOT NULL REFERENCES templates(id),
                category_id INTEGER NOT NULL REFERENCES categories(id),
                PRIMARY KEY (template_id, category_id)
            );

            CREATE TABLE collections (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                rank        INTEGER NOT NULL DEFAULT 0,
                name        TEXT NOT NULL,
                description TEXT,
                total_views INTEGER,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE collection_categories (
                collection_id INTEGER NOT NULL REFERENCES collections(id),
                category_id   INTEGER NOT NULL REFERENCES categories(id),
                PRIMARY KEY (collection_id, category_id)
            );

            CREATE TABLE collection_workflows (
                collection_id INTEGER NOT NULL REFERENCES collections(id),
                template_id   INTEGER NOT NULL REFERENCES templates(id),
                PRIMARY KEY (collection_id, template_id)
            );

            CREATE INDEX idx_template_categories_category
                ON template_categories(category_id);

            CREATE INDEX idx_collection_categories_category
                ON collection_categories(category_id);

            INSERT INTO schema_version (version) VALUES (1);
            "
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
