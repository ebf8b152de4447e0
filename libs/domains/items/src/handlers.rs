use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, OptionalValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use database::RepositoryProvider;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{Item, ItemDto};
use crate::service::ItemService;

const TAG: &str = "items";

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(ItemDto),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Collection routes, meant to be nested at the collection path (e.g. `/items`)
pub fn router<P>(service: ItemService<P>) -> Router
where
    P: RepositoryProvider<Item, i32>,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items::<P>).post(create_item::<P>))
        .route(
            "/{id}",
            get(get_item::<P>).put(update_item::<P>).delete(delete_item::<P>),
        )
        .with_state(shared_service)
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All items ordered by id", body = Vec<ItemDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<P: RepositoryProvider<Item, i32>>(
    State(service): State<Arc<ItemService<P>>>,
) -> ItemResult<Json<Vec<ItemDto>>> {
    let items = service.get_all().await?;
    Ok(Json(items))
}

/// Create an item
///
/// Any `id` in the body is ignored. The response carries the stored item and a
/// `Location` header pointing at it.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ItemDto,
    responses(
        (status = 201, description = "Item created", body = ItemDto,
            headers(("Location" = String, description = "URL of the created item"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<P: RepositoryProvider<Item, i32>>(
    State(service): State<Arc<ItemService<P>>>,
    OriginalUri(uri): OriginalUri,
    OptionalValidatedJson(dto): OptionalValidatedJson<ItemDto>,
) -> ItemResult<impl IntoResponse> {
    let created = service.create(dto).await?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Get an item by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Item id, must be positive")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<P: RepositoryProvider<Item, i32>>(
    State(service): State<Arc<ItemService<P>>>,
    IdPath(id): IdPath<i32>,
) -> ItemResult<Json<ItemDto>> {
    let item = service.get(id).await?;
    Ok(Json(item))
}

/// Replace the name and completion flag of an item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Item id, must be positive")
    ),
    request_body = ItemDto,
    responses(
        (status = 200, description = "Item updated"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<P: RepositoryProvider<Item, i32>>(
    State(service): State<Arc<ItemService<P>>>,
    IdPath(id): IdPath<i32>,
    OptionalValidatedJson(dto): OptionalValidatedJson<ItemDto>,
) -> ItemResult<StatusCode> {
    service.update(id, dto).await?;
    Ok(StatusCode::OK)
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Item id, must be positive")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<P: RepositoryProvider<Item, i32>>(
    State(service): State<Arc<ItemService<P>>>,
    IdPath(id): IdPath<i32>,
) -> ItemResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
