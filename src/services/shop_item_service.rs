use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::shop_items::{CreateShopItemRequest, ShopItemList, UpdateShopItemRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        shop_items::{ActiveModel, CategoryIds, Column, Entity as ShopItems, Model as ShopItemModel},
    },
    error::{AppError, AppResult},
    models::{Category, ShopItem},
    response::{ApiResponse, Empty},
    rules::check_categories,
    services::category_service::category_from_entity,
    state::AppState,
};

pub async fn list_shop_items(state: &AppState) -> AppResult<ApiResponse<ShopItemList>> {
    let models = ShopItems::find()
        .order_by_asc(Column::CreatedAt)
        .all(&state.orm)
        .await?;
    let items = resolve_shop_items(&state.orm, models).await?;

    let count = items.len();
    Ok(ApiResponse::listed(ShopItemList { items }, count))
}

pub async fn get_shop_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ShopItem>> {
    let model = find_shop_item(&state.orm, id).await?;
    Ok(ApiResponse::success(resolve_shop_item(&state.orm, model).await?))
}

pub async fn create_shop_item(
    state: &AppState,
    payload: CreateShopItemRequest,
) -> AppResult<ApiResponse<ShopItem>> {
    let payload = payload.validate()?;
    let categories = check_categories(&state.orm, &payload.categories).await?;

    let now = Utc::now();
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        price: Set(payload.price),
        categories: Set(CategoryIds(categories)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(shop_item_id = %model.id, price = model.price, "shop item created");

    Ok(ApiResponse::success(resolve_shop_item(&state.orm, model).await?))
}

pub async fn update_shop_item(
    state: &AppState,
    id: Uuid,
    payload: UpdateShopItemRequest,
) -> AppResult<ApiResponse<ShopItem>> {
    let existing = find_shop_item(&state.orm, id).await?;
    let payload = payload.validate()?;

    let mut active: ActiveModel = existing.into();
    if let Some(categories) = payload.categories {
        let categories = check_categories(&state.orm, &categories).await?;
        active.categories = Set(CategoryIds(categories));
    }
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;
    Ok(ApiResponse::success(resolve_shop_item(&state.orm, model).await?))
}

pub async fn delete_shop_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Empty>> {
    let result = ShopItems::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Shop item not found"));
    }

    Ok(ApiResponse::success(Empty {}))
}

async fn find_shop_item(conn: &OrmConn, id: Uuid) -> AppResult<ShopItemModel> {
    ShopItems::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Shop item not found"))
}

async fn resolve_shop_item(conn: &OrmConn, model: ShopItemModel) -> AppResult<ShopItem> {
    let mut items = resolve_shop_items(conn, vec![model]).await?;
    items
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("resolved shop item went missing")))
}

/// Replaces category ids with the stored categories, loading them in one query.
/// Ids that no longer resolve are dropped.
pub(crate) async fn resolve_shop_items(
    conn: &OrmConn,
    models: Vec<ShopItemModel>,
) -> AppResult<Vec<ShopItem>> {
    let mut category_ids: Vec<Uuid> = models
        .iter()
        .flat_map(|model| model.categories.0.iter().copied())
        .collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        Categories::find()
            .filter(CategoryCol::Id.is_in(category_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|model| (model.id, category_from_entity(model)))
            .collect()
    };

    Ok(models
        .into_iter()
        .map(|model| shop_item_from_entity(model, &categories))
        .collect())
}

fn shop_item_from_entity(model: ShopItemModel, categories: &HashMap<Uuid, Category>) -> ShopItem {
    ShopItem {
        id: model.id,
        title: model.title,
        description: model.description,
        price: model.price,
        categories: model
            .categories
            .0
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
