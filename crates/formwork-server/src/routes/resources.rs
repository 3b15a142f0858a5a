//! Resource CRUD routes
//!
//! One router serves all three resource kinds; the kind is attached per
//! mounted instance as an `Extension`, and every handler delegates to the
//! generic mediator in the core crate.

use crate::{
    AppState, auth,
    error::{ApiError, Result},
    models::{CreateQuery, ListQuery},
};
use axum::{
    Extension, Json, Router,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use formwork::{Action, Permission, ResourceKind};
use serde_json::Value;
use tracing::{debug, info};

/// Header carrying the collection total on listing responses
const HEADER_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Create the routes for one resource kind
pub fn router(kind: ResourceKind) -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        // identifiers are full URIs, sent URL-encoded; a catch-all keeps
        // any stray slashes inside one parameter
        .route(
            "/{*id}",
            get(find_resource).put(update_resource).delete(delete_resource),
        )
        .layer(Extension(kind))
}

/// Create a new resource, decomposing embedded children
async fn create_resource(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CreateQuery>,
    Json(body): Json<Value>,
) -> Result<Response> {
    let principal = auth::current_principal(&headers)?;
    state
        .authorizer
        .must_have(&principal, Permission::new(kind, Action::Create))?;

    let import_mode = query.import_mode.unwrap_or(false);
    info!("creating {} (importMode: {})", kind, import_mode);

    let created = state.registry.create(kind, body, import_mode, &principal).await?;

    let id = created["@id"].as_str().unwrap_or_default();
    let location = format!(
        "{}/{}",
        uri.path().trim_end_matches('/'),
        urlencoding::encode(id)
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

/// List resources with pagination and projection
async fn list_resources(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let principal = auth::current_principal(&headers)?;
    state
        .authorizer
        .must_have(&principal, Permission::new(kind, Action::Read))?;

    debug!("listing {} with query: {:?}", kind, query);

    let limit = query.limit.unwrap_or(state.config.service.default_page_size);
    let offset = query.offset.unwrap_or(0);
    let summary = query.summary.unwrap_or(false);

    let page = state
        .registry
        .list(kind, limit, offset, summary, query.field_names.as_deref())
        .await?;

    let link = formwork::links::paging_link_header(uri.path(), page.total, limit, offset);

    let mut response = (StatusCode::OK, Json(page.items)).into_response();
    response.headers_mut().insert(
        HEADER_TOTAL_COUNT,
        header_value(&page.total.to_string())?,
    );
    if !link.is_empty() {
        response.headers_mut().insert(header::LINK, header_value(&link)?);
    }
    Ok(response)
}

/// Fetch one resource by its URL-encoded identifier
async fn find_resource(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let principal = auth::current_principal(&headers)?;
    state
        .authorizer
        .must_have(&principal, Permission::new(kind, Action::Read))?;

    let id = decode_id(&id)?;
    debug!("finding {} by id: {}", kind, id);

    let doc = state.registry.find(kind, &id).await?;
    Ok(Json(doc))
}

/// Replace one resource by its URL-encoded identifier
async fn update_resource(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let principal = auth::current_principal(&headers)?;
    state
        .authorizer
        .must_have(&principal, Permission::new(kind, Action::Update))?;

    let id = decode_id(&id)?;
    info!("updating {} by id: {}", kind, id);

    let updated = state.registry.update(kind, &id, body, &principal).await?;
    Ok(Json(updated))
}

/// Delete one resource by its URL-encoded identifier
async fn delete_resource(
    Extension(kind): Extension<ResourceKind>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let principal = auth::current_principal(&headers)?;
    state
        .authorizer
        .must_have(&principal, Permission::new(kind, Action::Delete))?;

    let id = decode_id(&id)?;
    info!("deleting {} by id: {}", kind, id);

    state.registry.delete(kind, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn decode_id(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| ApiError::bad_request("invalid URL encoding in identifier"))
}

fn header_value(raw: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(raw).map_err(|_| ApiError::internal("invalid response header value"))
}
