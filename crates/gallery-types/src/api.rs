use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// -- Categories --

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryDocument>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDocument {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub parent: Option<ParentCategory>,
}

#[derive(Debug, Serialize)]
pub struct ParentCategory {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

/// Category reference embedded in template and collection documents.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

// -- Users --

/// Author block. List views carry the user id; detail views omit the key.
#[derive(Debug, Clone, Serialize)]
pub struct UserDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub username: String,
    pub bio: Option<String>,
    pub verified: bool,
    pub links: Value,
    pub avatar: Option<String>,
}

// -- Collections --

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub id: i64,
    pub rank: i64,
    pub name: String,
    pub total_views: Option<i64>,
    pub created_at: String,
    pub workflows: Vec<WorkflowRef>,
    pub nodes: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRef {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub collection: CollectionDetail,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetail {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub total_views: i64,
    pub created_at: String,
    pub workflows: Vec<CollectionWorkflow>,
    pub nodes: Vec<Value>,
    pub categories: Vec<CategoryRef>,
    pub image: Vec<Value>,
}

/// A member template as embedded in a collection: the template projection,
/// flattened into one object.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionWorkflow {
    pub id: i64,
    pub name: String,
    pub views: i64,
    pub recent_views: i64,
    pub total_views: i64,
    pub created_at: String,
    pub description: String,
    pub workflow: Value,
    pub last_updated_by: i64,
    pub workflow_info: Value,
    pub user: UserDocument,
    pub nodes: Value,
    pub categories: Vec<CategoryRef>,
    pub image: Value,
}

/// Inbound collection. Scalars of the wrong JSON type read as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub rank: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_views: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    pub workflows: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionResponse {
    pub id: i64,
    pub name: String,
    pub rank: i64,
    pub total_views: Option<i64>,
    pub created_at: String,
    pub workflows: Value,
    pub nodes: Vec<Value>,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkflowRequest {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub collection_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub template_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWorkflowResponse {
    pub message: &'static str,
    pub collection_id: i64,
    pub template_id: i64,
}

// -- Templates --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_workflows: i64,
    pub workflows: Vec<SearchWorkflow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWorkflow {
    pub id: i64,
    pub name: String,
    pub total_views: i64,
    pub purchase_url: Option<String>,
    pub user: UserDocument,
    pub description: Option<String>,
    pub created_at: String,
    pub nodes: Value,
    #[serde(serialize_with = "price_or_zero")]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowListItem {
    pub id: i64,
    pub name: String,
    pub total_views: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub workflow: TemplateWorkflow,
    pub last_updated_by: i64,
    pub user: UserDocument,
    pub categories: Vec<CategoryRef>,
    pub workflow_info: Value,
    pub nodes: Value,
    pub image: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateWorkflow {
    pub id: i64,
    pub name: String,
    pub views: i64,
    pub recent_views: i64,
    pub total_views: i64,
    pub created_at: String,
    pub description: String,
    pub price: Option<f64>,
    pub purchase_url: Option<String>,
    pub workflow: Value,
}

/// Shape served on the import path: just enough to rebuild the workflow.
#[derive(Debug, Serialize)]
pub struct ImportTemplateResponse {
    pub id: i64,
    pub name: String,
    pub workflow: Value,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    #[serde(default, deserialize_with = "lenient_payload")]
    pub workflow: Option<TemplatePayload>,
}

/// Inbound template document. `user` and `categories` stay loosely typed:
/// they are resolved against the store as raw sub-documents. Scalars of the
/// wrong JSON type read as absent, so a non-integer `id` requests a
/// server-assigned one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_views: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub recent_views: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purchase_url: Option<String>,
    pub workflow: Option<Value>,
    pub workflow_info: Option<Value>,
    pub nodes: Option<Value>,
    pub image: Option<Value>,
    pub user: Option<Value>,
    pub categories: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CreateTemplateResponse {
    pub id: i64,
}

/// List views render a missing price as the integer `0`, never `null`.
fn price_or_zero<S>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match price {
        Some(amount) => serializer.serialize_f64(*amount),
        None => serializer.serialize_i64(0),
    }
}

// -- Lenient inbound scalars --

/// Integers only: `1.5`, `12.0` and `"7"` all read as absent.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A `workflow` member that is not an object reads as absent.
fn lenient_payload<'de, D>(deserializer: D) -> Result<Option<TemplatePayload>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        doc @ Value::Object(_) => TemplatePayload::deserialize(doc).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}
