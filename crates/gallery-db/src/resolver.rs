//! Get-or-create resolution for users and categories, plus category lookups.
//!
//! Creation is optimistic: insert, and if a concurrent writer won the unique
//! constraint, select the row it created.

use rusqlite::Connection;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::CategoryRefRow;
use crate::raw_json::RawJson;
use crate::store::{self, StoreResult};

pub const DEFAULT_CATEGORY_ICON: &str = "🏷️";

/// Parent chains deeper than this are cut; the category at the limit is
/// created without a parent.
pub const MAX_CATEGORY_DEPTH: usize = 16;

/// Resolve the author of a write to a user id.
///
/// Every write is attributed to `username`, the configured canonical user;
/// the payload's own `username` is not consulted. The profile fields of `doc`
/// are only used when that user row does not exist yet. Returns `None` when
/// `doc` is not an object.
pub fn get_or_create_user(conn: &Connection, username: &str, doc: &Value) -> StoreResult<Option<i64>> {
    if !doc.is_object() {
        return Ok(None);
    }

    if let Some(id) = user_id_by_username(conn, username)? {
        return Ok(Some(id));
    }
    insert_or_reselect_user(conn, username, doc)
}

/// Insert the user row; if a concurrent writer created `username` first,
/// return that row's id instead.
fn insert_or_reselect_user(conn: &Connection, username: &str, doc: &Value) -> StoreResult<Option<i64>> {
    let name = str_field(doc, "name").unwrap_or(username);
    let bio = str_field(doc, "bio").unwrap_or("");
    let verified = doc.get("verified").and_then(Value::as_bool).unwrap_or(false);
    let links = doc
        .get("links")
        .filter(|v| !v.is_null())
        .map(|v| RawJson::encode(Some(v)))
        .unwrap_or_else(|| RawJson::from_text("[]"));
    let avatar = str_field(doc, "avatar").unwrap_or("");

    let inserted = store::execute(
        conn,
        "INSERT INTO users (name, username, bio, verified, links, avatar) VALUES (?, ?, ?, ?, ?, ?)",
        &[
            name.into(),
            username.into(),
            bio.into(),
            verified.into(),
            links.into(),
            avatar.into(),
        ],
    );

    match inserted {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            info!("Created user '{}' ({})", username, id);
            Ok(Some(id))
        }
        Err(e) if e.is_constraint_violation() => {
            warn!("User '{}' was created concurrently, reselecting", username);
            user_id_by_username(conn, username)
        }
        Err(e) => Err(e),
    }
}

/// Resolve a category sub-document `{name, icon?, parent?}` to an id,
/// creating it (and its parent chain) when the name is unknown. Returns
/// `None` when `doc` is not an object or has no name.
pub fn get_or_create_category(conn: &Connection, doc: &Value) -> StoreResult<Option<i64>> {
    resolve_category(conn, doc, 0)
}

fn resolve_category(conn: &Connection, doc: &Value, depth: usize) -> StoreResult<Option<i64>> {
    if !doc.is_object() {
        return Ok(None);
    }
    let Some(name) = str_field(doc, "name").filter(|n| !n.is_empty()) else {
        debug!("Category without a name ignored");
        return Ok(None);
    };

    if let Some(id) = category_id_by_name(conn, name)? {
        return Ok(Some(id));
    }

    let parent_id = match doc.get("parent").filter(|p| p.is_object()) {
        Some(_) if depth + 1 >= MAX_CATEGORY_DEPTH => {
            warn!("Category '{}' exceeds parent depth {}, created without parent", name, MAX_CATEGORY_DEPTH);
            None
        }
        Some(parent) => resolve_category(conn, parent, depth + 1)?,
        None => None,
    };

    let icon = str_field(doc, "icon").unwrap_or(DEFAULT_CATEGORY_ICON);
    insert_or_reselect_category(conn, name, icon, parent_id)
}

/// Insert the category row; if a concurrent writer created `name` first,
/// return that row's id instead.
fn insert_or_reselect_category(
    conn: &Connection,
    name: &str,
    icon: &str,
    parent_id: Option<i64>,
) -> StoreResult<Option<i64>> {
    let inserted = store::execute(
        conn,
        "INSERT INTO categories (name, icon, parent_id) VALUES (?, ?, ?)",
        &[name.into(), icon.into(), parent_id.into()],
    );

    match inserted {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            debug!("Created category '{}' ({})", name, id);
            Ok(Some(id))
        }
        Err(e) if e.is_constraint_violation() => {
            warn!("Insert of category '{}' conflicted ({}), reselecting", name, e);
            category_id_by_name(conn, name)
        }
        Err(e) => Err(e),
    }
}

pub fn template_categories(conn: &Connection, template_id: i64) -> StoreResult<Vec<CategoryRefRow>> {
    store::query(
        conn,
        "SELECT c.id, c.name FROM categories c
         JOIN template_categories tc ON c.id = tc.category_id
         WHERE tc.template_id = ?
         ORDER BY c.id",
        &[template_id.into()],
        category_ref,
    )
}

pub fn collection_categories(conn: &Connection, collection_id: i64) -> StoreResult<Vec<CategoryRefRow>> {
    store::query(
        conn,
        "SELECT c.id, c.name FROM categories c
         JOIN collection_categories cc ON c.id = cc.category_id
         WHERE cc.collection_id = ?
         ORDER BY c.id",
        &[collection_id.into()],
        category_ref,
    )
}

fn category_ref(row: &rusqlite::Row<'_>) -> rusqlite::Result<CategoryRefRow> {
    Ok(CategoryRefRow {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn user_id_by_username(conn: &Connection, username: &str) -> StoreResult<Option<i64>> {
    store::query_opt(conn, "SELECT id FROM users WHERE username = ?", &[username.into()], |row| {
        row.get(0)
    })
}

fn category_id_by_name(conn: &Connection, name: &str) -> StoreResult<Option<i64>> {
    store::query_opt(conn, "SELECT id FROM categories WHERE name = ?", &[name.into()], |row| {
        row.get(0)
    })
}

fn str_field<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}
