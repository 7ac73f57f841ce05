use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::shop_items::{CreateShopItemRequest, ShopItemList, UpdateShopItemRequest},
    error::AppResult,
    middleware::extract::{JsonBody, RecordId},
    models::ShopItem,
    response::{ApiResponse, Empty},
    services::shop_item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shop_items).post(create_shop_item))
        .route(
            "/{id}",
            get(get_shop_item).put(update_shop_item).delete(delete_shop_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "List shop items", body = ApiResponse<ShopItemList>)
    ),
    tag = "Shop items"
)]
pub async fn list_shop_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ShopItemList>>> {
    let resp = shop_item_service::list_shop_items(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateShopItemRequest,
    responses(
        (status = 201, description = "Shop item created", body = ApiResponse<ShopItem>),
        (status = 400, description = "Invalid fields or unknown categories"),
    ),
    tag = "Shop items"
)]
pub async fn create_shop_item(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateShopItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ShopItem>>)> {
    let resp = shop_item_service::create_shop_item(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Shop item ID")
    ),
    responses(
        (status = 200, description = "Get shop item", body = ApiResponse<ShopItem>),
        (status = 404, description = "Shop item not found"),
    ),
    tag = "Shop items"
)]
pub async fn get_shop_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<ShopItem>>> {
    let resp = shop_item_service::get_shop_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Shop item ID")
    ),
    request_body = UpdateShopItemRequest,
    responses(
        (status = 200, description = "Updated shop item", body = ApiResponse<ShopItem>),
        (status = 400, description = "Invalid fields or unknown categories"),
        (status = 404, description = "Shop item not found"),
    ),
    tag = "Shop items"
)]
pub async fn update_shop_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(payload): JsonBody<UpdateShopItemRequest>,
) -> AppResult<Json<ApiResponse<ShopItem>>> {
    let resp = shop_item_service::update_shop_item(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Shop item ID")
    ),
    responses(
        (status = 200, description = "Deleted shop item", body = ApiResponse<Empty>),
        (status = 404, description = "Shop item not found"),
    ),
    tag = "Shop items"
)]
pub async fn delete_shop_item(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = shop_item_service::delete_shop_item(&state, id).await?;
    Ok(Json(resp))
}
