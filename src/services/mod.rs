pub mod category_service;
pub mod customer_service;
pub mod order_service;
pub mod shop_item_service;
