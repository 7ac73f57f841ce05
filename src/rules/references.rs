use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::orders::LineItemRequest, entity::orders::StoredLineItem, error::AppError,
    rules::CatalogLookup,
};

/// First referential violation found in a write request.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Orders must have at least one item")]
    EmptyItems,

    #[error("Shop item with id {0} not found")]
    ShopItemNotFound(String),

    #[error("Item quantity must be at least 1")]
    InvalidQuantity,

    #[error("One or more categories do not exist")]
    CategoryMismatch,

    #[error("Resource not found with id of {0}")]
    MalformedCategoryId(String),

    #[error(transparent)]
    Lookup(#[from] DbErr),
}

impl ReferenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReferenceError::CustomerNotFound | ReferenceError::ShopItemNotFound(_)
        )
    }
}

impl From<ReferenceError> for AppError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::Lookup(db) => AppError::from(db),
            ReferenceError::MalformedCategoryId(raw) => AppError::MalformedId(raw),
            err if err.is_not_found() => AppError::NotFound(err.to_string()),
            err => AppError::BadRequest(err.to_string()),
        }
    }
}

/// References of an order write that passed validation. A field is `None` when
/// the request did not supply it.
#[derive(Debug, Default, PartialEq)]
pub struct OrderReferences {
    pub customer: Option<Uuid>,
    pub items: Option<Vec<StoredLineItem>>,
}

fn parse_ref(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

pub async fn check_customer<L: CatalogLookup>(
    lookup: &L,
    raw: &str,
) -> Result<Uuid, ReferenceError> {
    match parse_ref(raw) {
        Some(id) if lookup.customer_exists(id).await? => Ok(id),
        _ => Err(ReferenceError::CustomerNotFound),
    }
}

/// Checks line items in order and stops at the first bad one.
pub async fn check_line_items<L: CatalogLookup>(
    lookup: &L,
    items: &[LineItemRequest],
) -> Result<Vec<StoredLineItem>, ReferenceError> {
    if items.is_empty() {
        return Err(ReferenceError::EmptyItems);
    }

    let mut checked = Vec::with_capacity(items.len());
    for item in items {
        let shop_item = match parse_ref(&item.shop_item) {
            Some(id) if lookup.shop_item_price(id).await?.is_some() => id,
            _ => return Err(ReferenceError::ShopItemNotFound(item.shop_item.clone())),
        };
        let quantity = match item.quantity {
            Some(quantity) if quantity >= 1 => quantity,
            _ => return Err(ReferenceError::InvalidQuantity),
        };
        checked.push(StoredLineItem {
            shop_item,
            quantity,
        });
    }
    Ok(checked)
}

/// Validates whichever of `customer` and `items` were supplied, customer first.
pub async fn check_order_references<L: CatalogLookup>(
    lookup: &L,
    customer: Option<&str>,
    items: Option<&[LineItemRequest]>,
) -> Result<OrderReferences, ReferenceError> {
    let customer = match customer {
        Some(raw) => Some(check_customer(lookup, raw).await?),
        None => None,
    };
    let items = match items {
        Some(items) => Some(check_line_items(lookup, items).await?),
        None => None,
    };
    Ok(OrderReferences { customer, items })
}

/// Bulk existence check for shop item categories.
///
/// The number of matching categories is compared with the number of ids as
/// supplied, so a repeated id counts twice on the request side and once on the
/// store side. An id that is not a UUID fails before the lookup.
pub async fn check_categories<L: CatalogLookup>(
    lookup: &L,
    supplied: &[String],
) -> Result<Vec<Uuid>, ReferenceError> {
    if supplied.is_empty() {
        return Ok(Vec::new());
    }

    let ids = supplied
        .iter()
        .map(|raw| parse_ref(raw).ok_or_else(|| ReferenceError::MalformedCategoryId(raw.clone())))
        .collect::<Result<Vec<Uuid>, _>>()?;
    let found = lookup.count_categories(&ids).await?;
    if found != supplied.len() as u64 {
        return Err(ReferenceError::CategoryMismatch);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{BrokenCatalog, MemoryCatalog};
    use axum::http::StatusCode;
    use rstest::rstest;

    fn catalog() -> (MemoryCatalog, Uuid, Uuid) {
        let customer = Uuid::new_v4();
        let item = Uuid::new_v4();
        let catalog = MemoryCatalog::default()
            .with_customer(customer)
            .with_item(item, 10.0);
        (catalog, customer, item)
    }

    #[tokio::test]
    async fn accepts_a_valid_order() {
        let (catalog, customer, item) = catalog();
        let items = vec![LineItemRequest::new(item.to_string(), 3)];
        let customer_id = customer.to_string();

        let refs = check_order_references(&catalog, Some(customer_id.as_str()), Some(items.as_slice()))
            .await
            .unwrap();

        assert_eq!(refs.customer, Some(customer));
        assert_eq!(
            refs.items,
            Some(vec![StoredLineItem {
                shop_item: item,
                quantity: 3
            }])
        );
    }

    #[tokio::test]
    async fn unknown_customer_is_not_found() {
        let (catalog, _, item) = catalog();
        let items = vec![LineItemRequest::new(item.to_string(), 1)];
        let missing = Uuid::new_v4().to_string();
        let err = check_order_references(&catalog, Some(missing.as_str()), Some(items.as_slice()))
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::CustomerNotFound));
        assert_eq!(AppError::from(err).status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn customer_is_checked_before_items() {
        let catalog = MemoryCatalog::default();
        let err = check_order_references(&catalog, Some("nobody"), Some(Vec::new().as_slice()))
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::CustomerNotFound));
    }

    #[tokio::test]
    async fn empty_items_are_bad_input() {
        let (catalog, customer, _) = catalog();
        let customer_id = customer.to_string();
        let err = check_order_references(&catalog, Some(customer_id.as_str()), Some(Vec::new().as_slice()))
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyItems));
        assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_shop_item_id_reports_the_raw_value() {
        let (catalog, _, _) = catalog();
        let items = vec![LineItemRequest::new("deadbeef", 1)];
        let err = check_line_items(&catalog, &items).await.unwrap_err();
        assert_eq!(err.to_string(), "Shop item with id deadbeef not found");
        assert_eq!(AppError::from(err).status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(-2))]
    #[case(None)]
    #[tokio::test]
    async fn quantity_below_one_is_bad_input(#[case] quantity: Option<i64>) {
        let (catalog, _, item) = catalog();
        let items = vec![
            LineItemRequest::new(item.to_string(), 2),
            LineItemRequest {
                shop_item: item.to_string(),
                quantity,
            },
        ];
        let err = check_line_items(&catalog, &items).await.unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidQuantity));
    }

    #[tokio::test]
    async fn first_failure_wins() {
        let (catalog, _, item) = catalog();
        let missing = Uuid::new_v4();
        let items = vec![
            LineItemRequest::new(item.to_string(), 0),
            LineItemRequest::new(missing.to_string(), 1),
        ];
        let err = check_line_items(&catalog, &items).await.unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidQuantity));

        let items = vec![
            LineItemRequest::new(missing.to_string(), 0),
            LineItemRequest::new(item.to_string(), 0),
        ];
        let err = check_line_items(&catalog, &items).await.unwrap_err();
        assert!(matches!(err, ReferenceError::ShopItemNotFound(id) if id == missing.to_string()));
    }

    #[tokio::test]
    async fn update_checks_only_supplied_fields() {
        let catalog = MemoryCatalog::default();
        let refs = check_order_references(&catalog, None, None).await.unwrap();
        assert_eq!(refs, OrderReferences::default());
    }

    #[tokio::test]
    async fn store_failures_propagate_as_server_errors() {
        let err = check_customer(&BrokenCatalog, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::Lookup(_)));
        assert_eq!(
            AppError::from(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn categories_must_all_exist() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let catalog = MemoryCatalog::default().with_category(a).with_category(b);

        let ids = check_categories(&catalog, &[a.to_string(), b.to_string()])
            .await
            .unwrap();
        assert_eq!(ids, vec![a, b]);

        let err = check_categories(&catalog, &[a.to_string(), Uuid::new_v4().to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::CategoryMismatch));
        assert_eq!(AppError::from(err).status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn category_check_compares_raw_counts() {
        let a = Uuid::new_v4();
        let catalog = MemoryCatalog::default().with_category(a);

        let err = check_categories(&catalog, &[a.to_string(), a.to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::CategoryMismatch));
    }

    #[tokio::test]
    async fn malformed_category_id_is_not_found() {
        let a = Uuid::new_v4();
        let catalog = MemoryCatalog::default().with_category(a);

        let err = check_categories(&BrokenCatalog, &[a.to_string(), "not-an-id".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(&err, ReferenceError::MalformedCategoryId(raw) if raw == "not-an-id"));

        let err = AppError::from(err);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Resource not found with id of not-an-id");

        let ids = check_categories(&catalog, &[format!(" {a} ")]).await.unwrap();
        assert_eq!(ids, vec![a]);
    }

    #[tokio::test]
    async fn no_categories_skips_the_lookup() {
        let ids = check_categories(&BrokenCatalog, &[]).await.unwrap();
        assert!(ids.is_empty());
    }
}
