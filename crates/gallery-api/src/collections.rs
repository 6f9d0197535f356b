use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::info;

use gallery_db::models::{LinkOutcome, NewCollection};
use gallery_types::api::{
    AddWorkflowRequest, AddWorkflowResponse, CollectionResponse, CollectionsResponse,
    CreateCollectionRequest, CreateCollectionResponse,
};

use crate::error::{AppError, AppResult};
use crate::params::{self, parse_body};
use crate::projection;
use crate::state::{AppState, with_db};

/// GET /templates/collections
pub async fn list_collections(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<CollectionsResponse>> {
    let search = params::collection_search(&pairs);
    let rows = with_db(&state, move |s| s.db.list_collections(&search)).await?;

    Ok(Json(CollectionsResponse {
        collections: rows.into_iter().map(projection::collection_summary).collect(),
    }))
}

/// GET /templates/collections/{id}
pub async fn get_collection(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let not_found = || AppError::not_found("Collection not found");
    let id = params::path_id(&raw_id).ok_or_else(not_found)?;

    let rows = with_db(&state, move |s| s.db.collection_by_id(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(CollectionResponse {
        collection: projection::collection_detail(rows),
    }))
}

/// PUT /templates/collections: create a collection, optionally seeded with
/// member templates `workflows: [{id}]`.
pub async fn create_collection(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let req: CreateCollectionRequest = parse_body(&body)?;

    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required field: name"))?;
    let created_at = req
        .created_at
        .ok_or_else(|| AppError::bad_request("Missing required field: createdAt"))?;

    let template_ids: Vec<i64> = req
        .workflows
        .as_ref()
        .and_then(Value::as_array)
        .map(|refs| {
            refs.iter()
                .filter_map(|r| r.get("id").and_then(Value::as_i64))
                .collect()
        })
        .unwrap_or_default();

    let collection = NewCollection {
        rank: req.rank.unwrap_or(0),
        name,
        description: req.description,
        total_views: req.total_views,
        created_at,
    };

    let (id, collection) = with_db(&state, move |s| {
        let id = s.db.create_collection(&collection, &template_ids)?;
        Ok((id, collection))
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCollectionResponse {
            id,
            name: collection.name,
            rank: collection.rank,
            total_views: collection.total_views,
            created_at: collection.created_at,
            workflows: req.workflows.unwrap_or_else(|| Value::Array(Vec::new())),
            nodes: Vec::new(),
            message: "Collection created successfully",
        }),
    ))
}

/// PATCH /templates/collections: add one template to one collection.
pub async fn add_workflow(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<AddWorkflowResponse>> {
    let req: AddWorkflowRequest = parse_body(&body)?;

    let (Some(collection_id), Some(template_id)) = (req.collection_id, req.template_id) else {
        return Err(AppError::bad_request(
            "Missing required fields: collectionId and templateId must be integers",
        ));
    };

    let outcome = with_db(&state, move |s| {
        s.db.add_template_to_collection(collection_id, template_id)
    })
    .await?;

    let message = match outcome {
        LinkOutcome::CollectionNotFound => return Err(AppError::not_found("Collection not found")),
        LinkOutcome::TemplateNotFound => return Err(AppError::not_found("Template not found")),
        LinkOutcome::Linked => {
            info!("Template {} added to collection {}", template_id, collection_id);
            "Workflow added to collection successfully"
        }
        LinkOutcome::AlreadyLinked => "Workflow already exists in collection",
    };

    Ok(Json(AddWorkflowResponse {
        message,
        collection_id,
        template_id,
    }))
}
