use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    CallerId, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SkeletonResult;
use crate::models::{CreateItem, Item, ItemList, ListParams, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const TAG: &str = "skeleton";

/// OpenAPI documentation for the Skeleton items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(Item, CreateItem, UpdateItem, ItemList),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Per-user item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the item router. Paths are relative; the caller nests it.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// List the caller's items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListParams),
    responses(
        (status = 200, description = "One page of the caller's items", body = ItemList),
        (status = 400, description = "Invalid user ID"),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    caller: Option<CallerId>,
    Query(params): Query<ListParams>,
) -> SkeletonResult<Json<ItemList>> {
    let list = service.list_items(caller.as_ref(), &params).await?;
    Ok(Json(list))
}

/// Create an item owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    caller: Option<CallerId>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> SkeletonResult<impl IntoResponse> {
    let item = service.create_item(caller.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    UuidPath(id): UuidPath,
) -> SkeletonResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Partially update one of the caller's items
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    caller: Option<CallerId>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> SkeletonResult<Json<Item>> {
    let item = service.update_item(caller.as_ref(), id, input).await?;
    Ok(Json(item))
}

/// Delete one of the caller's items
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    caller: Option<CallerId>,
    UuidPath(id): UuidPath,
) -> SkeletonResult<StatusCode> {
    service.delete_item(caller.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
