use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderRequest},
    entity::{
        customers::{Column as CustomerCol, Entity as Customers},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, LineItems, Model as OrderModel},
        shop_items::{Column as ShopItemCol, Entity as ShopItems},
    },
    error::{AppError, AppResult},
    models::{Customer, Order, OrderLine, OrderStatus, ShopItem},
    response::{ApiResponse, Empty},
    rules::{check_customer, check_line_items, check_order_references, compute_total_price, priced_lines},
    services::{customer_service::customer_from_entity, shop_item_service::resolve_shop_items},
    state::AppState,
};

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let models = Orders::find()
        .order_by_asc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;
    let items = resolve_orders(&state.orm, models).await?;

    let count = items.len();
    Ok(ApiResponse::listed(OrderList { items }, count))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = find_order(&state.orm, id).await?;
    Ok(ApiResponse::success(resolve_order(&state.orm, order).await?))
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let customer = payload
        .customer
        .as_deref()
        .filter(|customer| !customer.trim().is_empty())
        .ok_or_else(|| AppError::Validation(vec!["Customer is required".into()]))?;

    let customer_id = check_customer(&state.orm, customer).await?;
    let items = check_line_items(&state.orm, payload.items.as_deref().unwrap_or_default()).await?;
    let total_price = compute_total_price(&priced_lines(&items), &state.orm).await?;

    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        items: Set(LineItems(items)),
        total_price: Set(total_price),
        status: Set(payload.status.unwrap_or_default().as_str().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(order_id = %order.id, total_price = order.total_price, "order created");

    Ok(ApiResponse::success(resolve_order(&state.orm, order).await?))
}

/// Applies the supplied fields onto the stored order and re-derives its total.
pub async fn update_order(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = find_order(&state.orm, id).await?;
    let refs = check_order_references(
        &state.orm,
        payload.customer.as_deref(),
        payload.items.as_deref(),
    )
    .await?;

    let items = refs.items.unwrap_or_else(|| existing.items.0.clone());
    let total_price = compute_total_price(&priced_lines(&items), &state.orm).await?;

    let mut active: OrderActive = existing.into();
    if let Some(customer_id) = refs.customer {
        active.customer_id = Set(customer_id);
    }
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().to_string());
    }
    active.items = Set(LineItems(items));
    active.total_price = Set(total_price);
    active.updated_at = Set(Utc::now().into());

    let order = active.update(&state.orm).await?;
    tracing::info!(order_id = %order.id, total_price = order.total_price, "order updated");

    Ok(ApiResponse::success(resolve_order(&state.orm, order).await?))
}

pub async fn delete_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Empty>> {
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Order not found"));
    }

    Ok(ApiResponse::success(Empty {}))
}

async fn find_order(conn: &OrmConn, id: Uuid) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))
}

async fn resolve_order(conn: &OrmConn, model: OrderModel) -> AppResult<Order> {
    let mut orders = resolve_orders(conn, vec![model]).await?;
    orders
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("resolved order went missing")))
}

/// Embeds the referenced customer and shop items into each order.
async fn resolve_orders(conn: &OrmConn, models: Vec<OrderModel>) -> AppResult<Vec<Order>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let customer_ids: Vec<Uuid> = models.iter().map(|order| order.customer_id).collect();
    let customers: HashMap<Uuid, Customer> = Customers::find()
        .filter(CustomerCol::Id.is_in(customer_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|model| (model.id, customer_from_entity(model)))
        .collect();

    let shop_item_ids: Vec<Uuid> = models
        .iter()
        .flat_map(|order| order.items.0.iter().map(|item| item.shop_item))
        .collect();
    let shop_item_models = if shop_item_ids.is_empty() {
        Vec::new()
    } else {
        ShopItems::find()
            .filter(ShopItemCol::Id.is_in(shop_item_ids))
            .all(conn)
            .await?
    };
    let shop_items: HashMap<Uuid, ShopItem> = resolve_shop_items(conn, shop_item_models)
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    Ok(models
        .into_iter()
        .map(|model| order_from_entity(model, &customers, &shop_items))
        .collect())
}

fn order_from_entity(
    model: OrderModel,
    customers: &HashMap<Uuid, Customer>,
    shop_items: &HashMap<Uuid, ShopItem>,
) -> Order {
    Order {
        id: model.id,
        customer: customers.get(&model.customer_id).cloned(),
        items: model
            .items
            .0
            .iter()
            .map(|item| OrderLine {
                shop_item: shop_items.get(&item.shop_item).cloned(),
                quantity: item.quantity,
            })
            .collect(),
        total_price: model.total_price,
        status: stored_status(model.id, &model.status),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

/// Reads the status column. Values outside the known set are logged and
/// reported as `pending`; the row itself is left as stored.
fn stored_status(order_id: Uuid, raw: &str) -> OrderStatus {
    raw.parse().unwrap_or_else(|err| {
        tracing::warn!(order_id = %order_id, error = %err, "unrecognised stored order status");
        OrderStatus::default()
    })
}
