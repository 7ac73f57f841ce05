use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};

/// A requested line item. References are kept as raw strings so that an id the
/// store could never hold reports as "not found" rather than as a decode error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[serde(alias = "shopItemId")]
    pub shop_item: String,
    pub quantity: Option<i64>,
}

impl LineItemRequest {
    pub fn new(shop_item: impl Into<String>, quantity: i64) -> Self {
        Self {
            shop_item: shop_item.into(),
            quantity: Some(quantity),
        }
    }
}

/// Any `totalPrice` sent by the client is ignored; it is derived on save.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(alias = "customerId")]
    pub customer: Option<String>,
    pub items: Option<Vec<LineItemRequest>>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(alias = "customerId")]
    pub customer: Option<String>,
    pub items: Option<Vec<LineItemRequest>>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_id_suffixed_aliases_and_ignores_total_price() {
        let request: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "customerId": "c1",
            "items": [{ "shopItemId": "s1", "quantity": 3 }],
            "totalPrice": 1.0
        }))
        .unwrap();
        assert_eq!(request.customer.as_deref(), Some("c1"));
        let items = request.items.unwrap();
        assert_eq!(items[0].shop_item, "s1");
        assert_eq!(items[0].quantity, Some(3));
        assert!(request.status.is_none());
    }

    #[test]
    fn rejects_unknown_status() {
        let parsed = serde_json::from_value::<UpdateOrderRequest>(serde_json::json!({
            "status": "cancelled"
        }));
        assert!(parsed.is_err());
    }
}
