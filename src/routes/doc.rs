use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        orders::{CreateOrderRequest, LineItemRequest, OrderList, UpdateOrderRequest},
        shop_items::{CreateShopItemRequest, ShopItemList, UpdateShopItemRequest},
    },
    models::{Category, Customer, Order, OrderLine, OrderStatus, ShopItem},
    response::{ApiResponse, Empty, ErrorDetail},
    routes::{categories, customers, health, items, orders},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::list_customers,
        customers::create_customer,
        customers::delete_all_customers,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        items::list_shop_items,
        items::create_shop_item,
        items::get_shop_item,
        items::update_shop_item,
        items::delete_shop_item,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order
    ),
    components(
        schemas(
            Customer,
            Category,
            ShopItem,
            Order,
            OrderLine,
            OrderStatus,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateShopItemRequest,
            UpdateShopItemRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            LineItemRequest,
            CustomerList,
            CategoryList,
            ShopItemList,
            OrderList,
            Empty,
            ErrorDetail,
            health::HealthData,
            ApiResponse<Customer>,
            ApiResponse<Category>,
            ApiResponse<ShopItem>,
            ApiResponse<Order>,
            ApiResponse<CustomerList>,
            ApiResponse<CategoryList>,
            ApiResponse<ShopItemList>,
            ApiResponse<OrderList>,
            ApiResponse<Empty>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Categories", description = "Shop item category endpoints"),
        (name = "Shop items", description = "Shop item endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/customers/{id}")]
    #[case("/api/categories/{id}")]
    #[case("/api/items/{id}")]
    #[case("/api/orders/{id}")]
    fn record_paths_take_a_uuid_id(#[case] path: &str) {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let param = &doc["paths"][path]["get"]["parameters"][0];

        assert_eq!(param["name"], "id");
        assert_eq!(param["in"], "path");
        assert_eq!(param["schema"]["type"], "string");
        assert_eq!(param["schema"]["format"], "uuid");
    }
}
