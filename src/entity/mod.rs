pub mod categories;
pub mod customers;
pub mod orders;
pub mod shop_items;

pub use categories::Entity as Categories;
pub use customers::Entity as Customers;
pub use orders::Entity as Orders;
pub use shop_items::Entity as ShopItems;
