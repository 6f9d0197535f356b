//! Database row types: these map directly to SQLite rows.
//! Distinct from gallery-types wire documents to keep the DB layer independent.

use crate::raw_json::RawJson;

pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub parent: Option<ParentRow>,
}

pub struct ParentRow {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRefRow {
    pub id: i64,
    pub name: String,
}

pub struct UserRow {
    pub id: i64,
    pub name: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    pub verified: bool,
    pub links: RawJson,
    pub avatar: Option<String>,
}

pub struct CollectionRow {
    pub id: i64,
    pub rank: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_views: Option<i64>,
    pub created_at: String,
}

/// A collection row plus the ids of its member templates.
pub struct CollectionListing {
    pub collection: CollectionRow,
    pub template_ids: Vec<i64>,
}

pub struct CollectionDetailRows {
    pub collection: CollectionRow,
    pub workflows: Vec<TemplateDetailRows>,
    pub categories: Vec<CategoryRefRow>,
}

/// Full template row joined with its owner.
pub struct TemplateRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub total_views: i64,
    pub recent_views: i64,
    pub price: Option<f64>,
    pub purchase_url: Option<String>,
    pub last_updated_by: Option<i64>,
    pub workflow: RawJson,
    pub workflow_info: RawJson,
    pub nodes: RawJson,
    pub image: RawJson,
    pub user: UserRow,
}

pub struct TemplateDetailRows {
    pub template: TemplateRow,
    pub categories: Vec<CategoryRefRow>,
}

/// Template as listed by search: a narrower column set than [`TemplateRow`].
pub struct SearchRow {
    pub id: i64,
    pub name: String,
    pub total_views: i64,
    pub purchase_url: Option<String>,
    pub user: UserRow,
    pub description: Option<String>,
    pub created_at: String,
    pub nodes: RawJson,
    pub price: Option<f64>,
}

pub struct SearchPage {
    pub total: i64,
    pub rows: Vec<SearchRow>,
}

pub struct TemplateListRow {
    pub id: i64,
    pub name: String,
    pub total_views: i64,
}

pub struct ImportRow {
    pub id: i64,
    pub name: String,
    pub workflow: RawJson,
}

/// Template write. `id <= 0` or `None` requests a server-assigned id.
pub struct NewTemplate {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub total_views: i64,
    pub recent_views: i64,
    pub price: Option<f64>,
    pub purchase_url: Option<String>,
    pub workflow: RawJson,
    pub workflow_info: RawJson,
    pub nodes: RawJson,
    pub image: RawJson,
}

pub enum TemplateWrite {
    Saved(i64),
    InvalidUser,
}

pub struct NewCollection {
    pub rank: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_views: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
    CollectionNotFound,
    TemplateNotFound,
}
