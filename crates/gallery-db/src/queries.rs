use rusqlite::{Connection, Row};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::Database;
use crate::models::{
    CategoryRow, CollectionDetailRows, CollectionListing, CollectionRow, ImportRow, LinkOutcome,
    NewCollection, NewTemplate, ParentRow, SearchPage, SearchRow, TemplateDetailRows,
    TemplateListRow, TemplateRow, TemplateWrite, UserRow,
};
use crate::query_builder::{Clause, Filters, Page};
use crate::resolver;
use crate::store::{self, SqlParam, StoreResult};

// -- Statement fragments --

const COLLECTION_LIST_BASE: &str =
    "SELECT DISTINCT c.id, c.rank, c.name, c.description, c.total_views, c.created_at FROM collections c";
const COLLECTION_CATEGORY_JOINS: &[&str] = &["JOIN collection_categories cc ON c.id = cc.collection_id"];

const TEMPLATE_SEARCH_BASE: &str = "SELECT DISTINCT t.id, t.name, t.total_views, t.purchase_url, \
     u.id, u.name, u.username, u.bio, u.verified, u.links, u.avatar, \
     t.description, t.created_at, t.nodes_data, t.price \
     FROM templates t JOIN users u ON t.user_id = u.id";
const TEMPLATE_COUNT_BASE: &str = "SELECT COUNT(DISTINCT t.id) FROM templates t";
const TEMPLATE_CATEGORY_JOINS: &[&str] = &[
    "JOIN template_categories tc ON t.id = tc.template_id",
    "JOIN categories c ON tc.category_id = c.id",
];

const TEMPLATE_DETAIL_COLUMNS: &str = "SELECT t.id, t.name, t.description, t.created_at, \
     t.total_views, t.recent_views, t.price, t.purchase_url, t.last_updated_by, \
     t.workflow_data, t.workflow_info, t.nodes_data, t.image_data, \
     u.id, u.name, u.username, u.bio, u.verified, u.links, u.avatar \
     FROM templates t JOIN users u ON t.user_id = u.id";

/// Search filters as received from the request, already tokenized.
#[derive(Debug, Default, Clone)]
pub struct TemplateSearch {
    pub search: Option<String>,
    pub categories: Vec<String>,
}

impl TemplateSearch {
    /// Category names match by disjunction; the category group and the text
    /// search combine by conjunction.
    pub fn filters(&self) -> Filters {
        let mut filters = Filters::new();
        filters.push(Clause::any_of(
            TEMPLATE_CATEGORY_JOINS,
            "c.name = ?",
            self.categories.iter().map(|c| SqlParam::from(c.as_str())).collect(),
        ));
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            filters.push(Some(Clause::new(
                &[],
                "(t.name LIKE ? OR t.description LIKE ?)",
                vec![pattern.clone().into(), pattern.into()],
            )));
        }
        filters
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollectionSearch {
    pub search: Option<String>,
    pub category_ids: Vec<i64>,
}

impl CollectionSearch {
    pub fn filters(&self) -> Filters {
        let mut filters = Filters::new();
        filters.push(Clause::in_list(
            COLLECTION_CATEGORY_JOINS,
            "cc.category_id",
            self.category_ids.iter().map(|id| SqlParam::Int(*id)).collect(),
        ));
        if let Some(pattern) = like_pattern(self.search.as_deref()) {
            filters.push(Some(Clause::new(&[], "c.name LIKE ?", vec![pattern.into()])));
        }
        filters
    }
}

impl Database {
    // -- Categories --

    pub fn list_categories(&self) -> StoreResult<Vec<CategoryRow>> {
        self.with_conn(|conn| {
            store::query(
                conn,
                "SELECT c.id, c.name, c.icon, p.id, p.name, p.icon
                 FROM categories c
                 LEFT JOIN categories p ON c.parent_id = p.id
                 ORDER BY c.name",
                &[],
                |row| {
                    let parent = match row.get::<_, Option<i64>>(3)? {
                        Some(id) => Some(ParentRow {
                            id,
                            name: row.get(4)?,
                            icon: row.get(5)?,
                        }),
                        None => None,
                    };
                    Ok(CategoryRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        icon: row.get(2)?,
                        parent,
                    })
                },
            )
        })
    }

    // -- Collections --

    /// Collections ordered by rank then name, each with its member template
    /// ids. Membership is fetched per collection; collections are few.
    pub fn list_collections(&self, search: &CollectionSearch) -> StoreResult<Vec<CollectionListing>> {
        let built = search.filters().select(COLLECTION_LIST_BASE, "c.rank, c.name", None);

        self.with_conn(|conn| {
            let collections = store::query(conn, &built.sql, &built.params, collection_row)?;

            collections
                .into_iter()
                .map(|collection| {
                    let template_ids = store::query(
                        conn,
                        "SELECT template_id FROM collection_workflows WHERE collection_id = ? ORDER BY template_id",
                        &[collection.id.into()],
                        |row| row.get(0),
                    )?;
                    Ok(CollectionListing {
                        collection,
                        template_ids,
                    })
                })
                .collect()
        })
    }

    pub fn collection_by_id(&self, id: i64) -> StoreResult<Option<CollectionDetailRows>> {
        self.with_conn(|conn| {
            let Some(collection) = store::query_opt(
                conn,
                "SELECT id, rank, name, description, total_views, created_at FROM collections WHERE id = ?",
                &[id.into()],
                collection_row,
            )?
            else {
                return Ok(None);
            };

            let templates = store::query(
                conn,
                &format!(
                    "{} JOIN collection_workflows cw ON t.id = cw.template_id WHERE cw.collection_id = ? ORDER BY t.id",
                    TEMPLATE_DETAIL_COLUMNS
                ),
                &[id.into()],
                template_row,
            )?;

            let mut workflows = Vec::with_capacity(templates.len());
            for template in templates {
                let categories = resolver::template_categories(conn, template.id)?;
                workflows.push(TemplateDetailRows {
                    template,
                    categories,
                });
            }

            let categories = resolver::collection_categories(conn, id)?;

            Ok(Some(CollectionDetailRows {
                collection,
                workflows,
                categories,
            }))
        })
    }

    pub fn create_collection(&self, collection: &NewCollection, template_ids: &[i64]) -> StoreResult<i64> {
        self.with_conn_mut(|conn| {
            store::execute(
                conn,
                "INSERT INTO collections (rank, name, description, total_views, created_at) VALUES (?, ?, ?, ?, ?)",
                &[
                    collection.rank.into(),
                    collection.name.as_str().into(),
                    collection.description.clone().into(),
                    collection.total_views.into(),
                    collection.created_at.as_str().into(),
                ],
            )?;
            let collection_id = conn.last_insert_rowid();

            // Membership links commit one by one; a failed link leaves the
            // collection in place.
            for template_id in template_ids.iter().copied().filter(|id| *id > 0) {
                if let Err(e) = link_template(conn, collection_id, template_id) {
                    warn!(
                        "Collection {}: could not link template {}: {}",
                        collection_id, template_id, e
                    );
                }
            }

            info!("Created collection '{}' ({})", collection.name, collection_id);
            Ok(collection_id)
        })
    }

    /// Link a template into a collection. Both rows are probed first; the
    /// link itself is insert-or-ignore.
    pub fn add_template_to_collection(&self, collection_id: i64, template_id: i64) -> StoreResult<LinkOutcome> {
        self.with_conn_mut(|conn| {
            if !exists(conn, "SELECT id FROM collections WHERE id = ?", collection_id)? {
                return Ok(LinkOutcome::CollectionNotFound);
            }
            if !exists(conn, "SELECT id FROM templates WHERE id = ?", template_id)? {
                return Ok(LinkOutcome::TemplateNotFound);
            }

            let changed = link_template(conn, collection_id, template_id)?;
            Ok(if changed > 0 {
                LinkOutcome::Linked
            } else {
                LinkOutcome::AlreadyLinked
            })
        })
    }

    // -- Templates --

    /// One page of templates, newest id first, with the total match count.
    pub fn search_templates(&self, search: &TemplateSearch, page: Page) -> StoreResult<SearchPage> {
        let filters = search.filters();
        let count = filters.count(TEMPLATE_COUNT_BASE);
        let select = filters.select(TEMPLATE_SEARCH_BASE, "t.id DESC", Some(page));

        self.with_conn(|conn| {
            let total = store::query_opt(conn, &count.sql, &count.params, |row| row.get(0))?.unwrap_or(0);
            let rows = store::query(conn, &select.sql, &select.params, |row| {
                Ok(SearchRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    total_views: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                    purchase_url: row.get(3)?,
                    user: user_row(row, 4)?,
                    description: row.get(11)?,
                    created_at: row.get(12)?,
                    nodes: row.get(13)?,
                    price: row.get(14)?,
                })
            })?;
            debug!("Template search matched {} rows, returning {}", total, rows.len());
            Ok(SearchPage { total, rows })
        })
    }

    pub fn list_templates(&self) -> StoreResult<Vec<TemplateListRow>> {
        self.with_conn(|conn| {
            store::query(conn, "SELECT id, name, total_views FROM templates ORDER BY id", &[], |row| {
                Ok(TemplateListRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    total_views: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                })
            })
        })
    }

    pub fn template_by_id(&self, id: i64) -> StoreResult<Option<TemplateDetailRows>> {
        self.with_conn(|conn| {
            let Some(template) = store::query_opt(
                conn,
                &format!("{} WHERE t.id = ?", TEMPLATE_DETAIL_COLUMNS),
                &[id.into()],
                template_row,
            )?
            else {
                return Ok(None);
            };
            let categories = resolver::template_categories(conn, id)?;
            Ok(Some(TemplateDetailRows {
                template,
                categories,
            }))
        })
    }

    pub fn template_for_import(&self, id: i64) -> StoreResult<Option<ImportRow>> {
        self.with_conn(|conn| {
            store::query_opt(
                conn,
                "SELECT id, name, workflow_data FROM templates WHERE id = ?",
                &[id.into()],
                |row| {
                    Ok(ImportRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        workflow: row.get(2)?,
                    })
                },
            )
        })
    }

    /// Insert a template or replace the row with the same id, then link its
    /// categories.
    ///
    /// The template row and each category link commit independently: a
    /// category that fails to resolve or link is logged and skipped, and the
    /// template row stands.
    pub fn save_template(
        &self,
        attribution: &str,
        user: &Value,
        template: &NewTemplate,
        categories: &[Value],
    ) -> StoreResult<TemplateWrite> {
        self.with_conn_mut(|conn| {
            let Some(user_id) = resolver::get_or_create_user(conn, attribution, user)? else {
                return Ok(TemplateWrite::InvalidUser);
            };

            let id: i64 = store::query_opt(
                conn,
                "INSERT INTO templates (id, name, description, created_at, total_views, recent_views, price, \
                 purchase_url, user_id, last_updated_by, workflow_data, workflow_info, nodes_data, image_data) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET \
                   name = excluded.name, description = excluded.description, created_at = excluded.created_at, \
                   total_views = excluded.total_views, recent_views = excluded.recent_views, \
                   price = excluded.price, purchase_url = excluded.purchase_url, user_id = excluded.user_id, \
                   last_updated_by = excluded.last_updated_by, workflow_data = excluded.workflow_data, \
                   workflow_info = excluded.workflow_info, nodes_data = excluded.nodes_data, \
                   image_data = excluded.image_data \
                 RETURNING id",
                &[
                    template.id.filter(|id| *id > 0).into(),
                    template.name.as_str().into(),
                    template.description.as_str().into(),
                    template.created_at.as_str().into(),
                    template.total_views.into(),
                    template.recent_views.into(),
                    template.price.into(),
                    template.purchase_url.clone().into(),
                    user_id.into(),
                    user_id.into(),
                    template.workflow.clone().into(),
                    template.workflow_info.clone().into(),
                    template.nodes.clone().into(),
                    template.image.clone().into(),
                ],
                |row| row.get(0),
            )?
            .unwrap_or_else(|| conn.last_insert_rowid());

            for doc in categories {
                match resolver::get_or_create_category(conn, doc) {
                    Ok(Some(category_id)) => {
                        if let Err(e) = store::execute(
                            conn,
                            "INSERT OR IGNORE INTO template_categories (template_id, category_id) VALUES (?, ?)",
                            &[id.into(), category_id.into()],
                        ) {
                            warn!("Template {}: could not link category {}: {}", id, category_id, e);
                        }
                    }
                    Ok(None) => warn!("Template {}: skipping unresolvable category {}", id, doc),
                    Err(e) => warn!("Template {}: category resolution failed: {}", id, e),
                }
            }

            info!("Saved template '{}' ({})", template.name, id);
            Ok(TemplateWrite::Saved(id))
        })
    }
}

fn like_pattern(search: Option<&str>) -> Option<String> {
    search.filter(|s| !s.is_empty()).map(|s| format!("%{}%", s))
}

fn exists(conn: &Connection, sql: &str, id: i64) -> StoreResult<bool> {
    Ok(store::query_opt(conn, sql, &[id.into()], |row| row.get::<_, i64>(0))?.is_some())
}

fn link_template(conn: &Connection, collection_id: i64, template_id: i64) -> StoreResult<usize> {
    store::execute(
        conn,
        "INSERT OR IGNORE INTO collection_workflows (collection_id, template_id) VALUES (?, ?)",
        &[collection_id.into(), template_id.into()],
    )
}

fn collection_row(row: &Row<'_>) -> rusqlite::Result<CollectionRow> {
    Ok(CollectionRow {
        id: row.get(0)?,
        rank: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
        name: row.get(2)?,
        description: row.get(3)?,
        total_views: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// User columns starting at `offset`: id, name, username, bio, verified, links, avatar.
fn user_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        username: row.get(offset + 2)?,
        bio: row.get(offset + 3)?,
        verified: row.get::<_, Option<bool>>(offset + 4)?.unwrap_or(false),
        links: row.get(offset + 5)?,
        avatar: row.get(offset + 6)?,
    })
}

fn template_row(row: &Row<'_>) -> rusqlite::Result<TemplateRow> {
    Ok(TemplateRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        total_views: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
        recent_views: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
        price: row.get(6)?,
        purchase_url: row.get(7)?,
        last_updated_by: row.get(8)?,
        workflow: row.get(9)?,
        workflow_info: row.get(10)?,
        nodes: row.get(11)?,
        image: row.get(12)?,
        user: user_row(row, 13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_json::{RawJson, Shape};
    use serde_json::json;

    const CANONICAL: &str = "Default API User";

    fn template(id: Option<i64>, name: &str) -> NewTemplate {
        NewTemplate {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            total_views: 5,
            recent_views: 1,
            price: None,
            purchase_url: None,
            workflow: RawJson::encode(Some(&json!({"nodes": [], "connections": {}}))),
            workflow_info: RawJson::default(),
            nodes: RawJson::default(),
            image: RawJson::default(),
        }
    }

    fn save(db: &Database, t: &NewTemplate, categories: &[Value]) -> i64 {
        match db.save_template(CANONICAL, &json!({"name": "Tester"}), t, categories).unwrap() {
            TemplateWrite::Saved(id) => id,
            TemplateWrite::InvalidUser => panic!("user rejected"),
        }
    }

    #[test]
    fn server_assigns_ids_and_replaces_by_id() {
        let db = Database::open_in_memory().unwrap();
        let a = save(&db, &template(None, "First"), &[]);
        let b = save(&db, &template(Some(0), "Second"), &[]);
        assert!(a > 0 && b > 0 && a != b);

        let again = save(&db, &template(Some(a), "First, renamed"), &[]);
        assert_eq!(again, a);

        let all = db.list_templates().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "First, renamed");
    }

    #[test]
    fn caller_supplied_id_is_kept() {
        let db = Database::open_in_memory().unwrap();
        let id = save(&db, &template(Some(4242), "Imported"), &[]);
        assert_eq!(id, 4242);
        assert!(db.template_by_id(4242).unwrap().is_some());
    }

    #[test]
    fn invalid_user_is_reported_without_writing() {
        let db = Database::open_in_memory().unwrap();
        let out = db
            .save_template(CANONICAL, &json!(null), &template(None, "Orphan"), &[])
            .unwrap();
        assert!(matches!(out, TemplateWrite::InvalidUser));
        assert!(db.list_templates().unwrap().is_empty());
    }

    #[test]
    fn unresolvable_categories_are_skipped() {
        let db = Database::open_in_memory().unwrap();
        let id = save(
            &db,
            &template(None, "Tagged"),
            &[json!({"name": "AI"}), json!({"icon": "no name"}), json!("bare"), json!({"name": "AI"})],
        );
        let detail = db.template_by_id(id).unwrap().unwrap();
        let names: Vec<_> = detail.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AI"]);
    }

    #[test]
    fn detail_defaults_last_updated_by_to_owner() {
        let db = Database::open_in_memory().unwrap();
        let id = save(&db, &template(None, "Owned"), &[]);
        let detail = db.template_by_id(id).unwrap().unwrap();
        assert_eq!(detail.template.last_updated_by, Some(detail.template.user.id));
        assert_eq!(detail.template.nodes.materialize(Shape::Array, "nodes_data"), json!([]));
    }

    #[test]
    fn search_paginates_newest_first() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..25 {
            save(&db, &template(None, &format!("wf-{}", i)), &[]);
        }
        let page = db
            .search_templates(&TemplateSearch::default(), Page::new(Some(2), Some(10)))
            .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.rows.len(), 10);
        let ids: Vec<i64> = page.rows.iter().map(|r| r.id).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(ids[0], 15);
    }

    #[test]
    fn category_filter_is_a_union() {
        let db = Database::open_in_memory().unwrap();
        let a = save(&db, &template(None, "only-a"), &[json!({"name": "A"})]);
        let b = save(&db, &template(None, "only-b"), &[json!({"name": "B"})]);
        let ab = save(&db, &template(None, "both"), &[json!({"name": "A"}), json!({"name": "B"})]);
        save(&db, &template(None, "neither"), &[json!({"name": "C"})]);

        let search = TemplateSearch {
            search: None,
            categories: vec!["A".into(), "B".into()],
        };
        let page = db.search_templates(&search, Page::default()).unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<i64> = page.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![ab, b, a]);
    }

    #[test]
    fn text_search_and_category_combine_by_and() {
        let db = Database::open_in_memory().unwrap();
        save(&db, &template(None, "Slack digest"), &[json!({"name": "Comms"})]);
        let hit = save(&db, &template(None, "Slack alerts"), &[json!({"name": "Ops"})]);
        save(&db, &template(None, "Pager"), &[json!({"name": "Ops"})]);

        let search = TemplateSearch {
            search: Some("Slack".into()),
            categories: vec!["Ops".into()],
        };
        let page = db.search_templates(&search, Page::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].id, hit);
    }

    #[test]
    fn collections_filter_and_membership() {
        let db = Database::open_in_memory().unwrap();
        let t1 = save(&db, &template(None, "one"), &[]);
        let t2 = save(&db, &template(None, "two"), &[]);

        let new = |name: &str, rank: i64| NewCollection {
            rank,
            name: name.to_string(),
            description: None,
            total_views: None,
            created_at: "2025-02-02".to_string(),
        };
        let beta = db.create_collection(&new("Beta", 1), &[t2, t1, 0, -3]).unwrap();
        let alpha = db.create_collection(&new("Alpha", 1), &[]).unwrap();
        let first = db.create_collection(&new("Zeta", 0), &[]).unwrap();

        let all = db.list_collections(&CollectionSearch::default()).unwrap();
        let order: Vec<i64> = all.iter().map(|c| c.collection.id).collect();
        assert_eq!(order, vec![first, alpha, beta]);
        assert_eq!(all[2].template_ids, vec![t1, t2]);

        let named = db
            .list_collections(&CollectionSearch {
                search: Some("et".into()),
                category_ids: vec![],
            })
            .unwrap();
        let names: Vec<&str> = named.iter().map(|c| c.collection.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Beta"]);
    }

    #[test]
    fn collection_category_filter_uses_ids() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .create_collection(
                &NewCollection {
                    rank: 0,
                    name: "Tagged".into(),
                    description: None,
                    total_views: Some(3),
                    created_at: "2025-02-02".into(),
                },
                &[],
            )
            .unwrap();
        db.create_collection(
            &NewCollection {
                rank: 0,
                name: "Plain".into(),
                description: None,
                total_views: None,
                created_at: "2025-02-02".into(),
            },
            &[],
        )
        .unwrap();
        let category = db
            .with_conn_mut(|conn| {
                let cat = resolver::get_or_create_category(conn, &json!({"name": "Finance"}))?.unwrap_or(0);
                store::execute(
                    conn,
                    "INSERT INTO collection_categories (collection_id, category_id) VALUES (?, ?)",
                    &[id.into(), cat.into()],
                )?;
                Ok(cat)
            })
            .unwrap();

        let found = db
            .list_collections(&CollectionSearch {
                search: None,
                category_ids: vec![category, 999],
            })
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].collection.id, id);

        let detail = db.collection_by_id(id).unwrap().unwrap();
        assert_eq!(detail.categories.len(), 1);
        assert_eq!(detail.categories[0].name, "Finance");
    }

    #[test]
    fn linking_is_idempotent_and_probes_existence() {
        let db = Database::open_in_memory().unwrap();
        let t = save(&db, &template(None, "member"), &[]);
        let c = db
            .create_collection(
                &NewCollection {
                    rank: 0,
                    name: "Set".into(),
                    description: None,
                    total_views: None,
                    created_at: "2025-02-02".into(),
                },
                &[],
            )
            .unwrap();

        assert_eq!(db.add_template_to_collection(c, t).unwrap(), LinkOutcome::Linked);
        assert_eq!(db.add_template_to_collection(c, t).unwrap(), LinkOutcome::AlreadyLinked);
        assert_eq!(db.add_template_to_collection(c + 100, t).unwrap(), LinkOutcome::CollectionNotFound);
        assert_eq!(db.add_template_to_collection(c, t + 100).unwrap(), LinkOutcome::TemplateNotFound);

        let detail = db.collection_by_id(c).unwrap().unwrap();
        assert_eq!(detail.workflows.len(), 1);
        assert_eq!(detail.workflows[0].template.id, t);
    }

    #[test]
    fn file_backed_database_reads_through_pool() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("catalog.db")).unwrap();
        let id = save(&db, &template(None, "persisted"), &[json!({"name": "Disk"})]);

        for _ in 0..8 {
            let detail = db.template_by_id(id).unwrap().unwrap();
            assert_eq!(detail.categories[0].name, "Disk");
        }
        assert_eq!(db.list_categories().unwrap().len(), 1);
    }
}
