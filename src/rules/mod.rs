//! Cross-entity rules applied on the write path: referential checks for orders
//! and shop items, and the order total derivation.

pub mod lookup;
pub mod pricing;
pub mod references;

pub use lookup::CatalogLookup;
pub use pricing::{PricedLine, ShopItemRef, compute_total_price, priced_lines};
pub use references::{
    OrderReferences, ReferenceError, check_categories, check_customer, check_line_items,
    check_order_references,
};
