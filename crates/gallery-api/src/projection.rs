//! Row to document folding.
//!
//! Nullable columns render as `null` except where the external documents
//! expect otherwise: collection detail `totalViews` renders `0`, detail
//! `description` renders `""`, and list `price` renders `0` (see
//! `SearchWorkflow`). Embedded JSON columns are reparsed through `RawJson`,
//! which supplies the empty-container fallback.

use gallery_db::models::{
    CategoryRefRow, CategoryRow, CollectionDetailRows, CollectionListing, SearchRow,
    TemplateDetailRows, TemplateListRow, UserRow,
};
use gallery_db::raw_json::Shape;
use gallery_types::api::{
    CategoryDocument, CategoryRef, CollectionDetail, CollectionSummary, CollectionWorkflow,
    ParentCategory, SearchWorkflow, TemplateResponse, TemplateWorkflow, UserDocument,
    WorkflowListItem, WorkflowRef,
};
use serde_json::Value;

pub fn category(row: CategoryRow) -> CategoryDocument {
    CategoryDocument {
        id: row.id,
        name: row.name,
        icon: row.icon,
        parent: row.parent.map(|p| ParentCategory {
            id: p.id,
            name: p.name,
            icon: p.icon,
        }),
    }
}

pub fn category_refs(rows: Vec<CategoryRefRow>) -> Vec<CategoryRef> {
    rows.into_iter()
        .map(|c| CategoryRef { id: c.id, name: c.name })
        .collect()
}

/// Author block; `with_id` is set in list contexts only.
pub fn user(row: UserRow, with_id: bool) -> UserDocument {
    UserDocument {
        id: with_id.then_some(row.id),
        links: row.links.materialize(Shape::Array, "users.links"),
        name: row.name,
        username: row.username,
        bio: row.bio,
        verified: row.verified,
        avatar: row.avatar,
    }
}

pub fn collection_summary(listing: CollectionListing) -> CollectionSummary {
    let c = listing.collection;
    CollectionSummary {
        id: c.id,
        rank: c.rank,
        name: c.name,
        total_views: c.total_views,
        created_at: c.created_at,
        workflows: listing
            .template_ids
            .into_iter()
            .map(|id| WorkflowRef { id })
            .collect(),
        nodes: Vec::new(),
    }
}

pub fn collection_detail(rows: CollectionDetailRows) -> CollectionDetail {
    let c = rows.collection;
    CollectionDetail {
        id: c.id,
        name: c.name,
        description: c.description.unwrap_or_default(),
        total_views: c.total_views.unwrap_or(0),
        created_at: c.created_at,
        workflows: rows
            .workflows
            .into_iter()
            .map(|t| TemplateProjection::from(t).into())
            .collect(),
        nodes: Vec::new(),
        categories: category_refs(rows.categories),
        image: Vec::new(),
    }
}

pub fn search_workflow(row: SearchRow) -> SearchWorkflow {
    SearchWorkflow {
        id: row.id,
        nodes: row.nodes.materialize(Shape::Array, "templates.nodes_data"),
        name: row.name,
        total_views: row.total_views,
        purchase_url: row.purchase_url,
        user: user(row.user, true),
        description: row.description,
        created_at: row.created_at,
        price: row.price,
    }
}

pub fn workflow_list_item(row: TemplateListRow) -> WorkflowListItem {
    WorkflowListItem {
        id: row.id,
        name: row.name,
        total_views: row.total_views,
    }
}

pub fn template(rows: TemplateDetailRows) -> TemplateResponse {
    TemplateProjection::from(rows).into()
}

/// A template with every embedded column materialized. Both the template
/// detail document and the collection member document are cut from it.
struct TemplateProjection {
    id: i64,
    name: String,
    total_views: i64,
    recent_views: i64,
    created_at: String,
    description: String,
    price: Option<f64>,
    purchase_url: Option<String>,
    workflow: Value,
    last_updated_by: i64,
    workflow_info: Value,
    user: UserDocument,
    nodes: Value,
    categories: Vec<CategoryRef>,
    image: Value,
}

impl From<TemplateDetailRows> for TemplateProjection {
    fn from(rows: TemplateDetailRows) -> Self {
        let t = rows.template;
        Self {
            id: t.id,
            name: t.name,
            total_views: t.total_views,
            recent_views: t.recent_views,
            created_at: t.created_at,
            description: t.description.unwrap_or_default(),
            price: t.price,
            purchase_url: t.purchase_url,
            workflow: t.workflow.materialize(Shape::Object, "templates.workflow_data"),
            last_updated_by: t.last_updated_by.unwrap_or(t.user.id),
            workflow_info: t.workflow_info.materialize(Shape::Object, "templates.workflow_info"),
            nodes: t.nodes.materialize(Shape::Array, "templates.nodes_data"),
            image: t.image.materialize(Shape::Array, "templates.image_data"),
            user: user(t.user, false),
            categories: category_refs(rows.categories),
        }
    }
}

impl From<TemplateProjection> for TemplateResponse {
    fn from(p: TemplateProjection) -> Self {
        TemplateResponse {
            workflow: TemplateWorkflow {
                id: p.id,
                name: p.name,
                views: p.total_views,
                recent_views: p.recent_views,
                total_views: p.total_views,
                created_at: p.created_at,
                description: p.description,
                price: p.price,
                purchase_url: p.purchase_url,
                workflow: p.workflow,
            },
            last_updated_by: p.last_updated_by,
            user: p.user,
            categories: p.categories,
            workflow_info: p.workflow_info,
            nodes: p.nodes,
            image: p.image,
        }
    }
}

impl From<TemplateProjection> for CollectionWorkflow {
    fn from(p: TemplateProjection) -> Self {
        CollectionWorkflow {
            id: p.id,
            name: p.name,
            views: p.total_views,
            recent_views: p.recent_views,
            total_views: p.total_views,
            created_at: p.created_at,
            description: p.description,
            workflow: p.workflow,
            last_updated_by: p.last_updated_by,
            workflow_info: p.workflow_info,
            user: p.user,
            nodes: p.nodes,
            categories: p.categories,
            image: p.image,
        }
    }
}
