use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use gallery_db::models::{NewTemplate, TemplateWrite};
use gallery_db::raw_json::{RawJson, Shape};
use gallery_types::api::{
    CreateTemplateRequest, CreateTemplateResponse, ImportTemplateResponse, SearchResponse,
    TemplateResponse, WorkflowListItem,
};

use crate::error::{AppError, AppResult};
use crate::params::{self, SearchQuery, parse_body};
use crate::projection;
use crate::state::{AppState, with_db};

/// GET /templates/search: paginated, newest first.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let filters = query.filters();
    let page = query.page();

    let result = with_db(&state, move |s| s.db.search_templates(&filters, page)).await?;

    Ok(Json(SearchResponse {
        total_workflows: result.total,
        workflows: result.rows.into_iter().map(projection::search_workflow).collect(),
    }))
}

/// GET /templates/workflows
pub async fn list_workflows(State(state): State<AppState>) -> AppResult<Json<Vec<WorkflowListItem>>> {
    let rows = with_db(&state, |s| s.db.list_templates()).await?;
    Ok(Json(rows.into_iter().map(projection::workflow_list_item).collect()))
}

/// GET /templates/workflows/{id}
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<TemplateResponse>> {
    let not_found = || AppError::not_found("Workflow not found");
    let id = params::path_id(&raw_id).ok_or_else(not_found)?;

    let rows = with_db(&state, move |s| s.db.template_by_id(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(projection::template(rows)))
}

/// GET /workflows/templates/{id}
pub async fn get_workflow_for_import(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ImportTemplateResponse>> {
    let not_found = || AppError::not_found("Workflow not found");
    let id = params::path_id(&raw_id).ok_or_else(not_found)?;

    let row = with_db(&state, move |s| s.db.template_for_import(id))
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ImportTemplateResponse {
        id: row.id,
        workflow: row.workflow.materialize(Shape::Object, "templates.workflow_data"),
        name: row.name,
    }))
}

/// PUT /templates/workflows: insert a template, or replace the one with the
/// same id.
pub async fn create_or_replace(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let req: CreateTemplateRequest = parse_body(&body)?;

    let Some(payload) = req.workflow else {
        return Err(missing_documents());
    };
    let user = match payload.user {
        Some(user) if user.is_object() => user,
        _ => return Err(missing_documents()),
    };

    let (Some(name), Some(description), Some(created_at), Some(workflow)) = (
        payload.name,
        payload.description,
        payload.created_at,
        payload.workflow.filter(Value::is_object),
    ) else {
        return Err(AppError::bad_request("Missing required fields in workflow object"));
    };

    let template = NewTemplate {
        id: payload.id,
        name,
        description,
        created_at,
        total_views: payload.total_views.unwrap_or(0),
        recent_views: payload.recent_views.unwrap_or(0),
        price: payload.price,
        purchase_url: payload.purchase_url,
        workflow: RawJson::encode(Some(&workflow)),
        workflow_info: RawJson::encode(payload.workflow_info.as_ref()),
        nodes: RawJson::encode(payload.nodes.as_ref()),
        image: RawJson::encode(payload.image.as_ref()),
    };

    let categories = match payload.categories {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    let write = with_db(&state, move |s| {
        s.db.save_template(&s.attribution, &user, &template, &categories)
    })
    .await?;

    match write {
        TemplateWrite::Saved(id) => Ok((StatusCode::CREATED, Json(CreateTemplateResponse { id }))),
        TemplateWrite::InvalidUser => Err(missing_documents()),
    }
}

fn missing_documents() -> AppError {
    AppError::bad_request("Missing 'workflow' or 'user' object in request body")
}
