use sea_orm::DbErr;
use uuid::Uuid;

use crate::{entity::orders::StoredLineItem, rules::CatalogLookup};

/// Shop item reference as seen by the total derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShopItemRef {
    /// Price already known to the caller.
    Resolved { price: f64 },
    /// Bare id; the price is looked up.
    Id(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub shop_item: ShopItemRef,
    pub quantity: i64,
}

impl From<&StoredLineItem> for PricedLine {
    fn from(item: &StoredLineItem) -> Self {
        Self {
            shop_item: ShopItemRef::Id(item.shop_item),
            quantity: item.quantity,
        }
    }
}

/// Sum of `price * quantity` over `lines`, accumulated in line order.
///
/// A line whose shop item cannot be found contributes nothing.
pub async fn compute_total_price<L: CatalogLookup>(
    lines: &[PricedLine],
    lookup: &L,
) -> Result<f64, DbErr> {
    let mut total = 0.0;
    for line in lines {
        let price = match line.shop_item {
            ShopItemRef::Resolved { price } => Some(price),
            ShopItemRef::Id(id) => lookup.shop_item_price(id).await?,
        };
        if let Some(price) = price {
            total += price * line.quantity as f64;
        }
    }
    Ok(total)
}

pub fn priced_lines(items: &[StoredLineItem]) -> Vec<PricedLine> {
    items.iter().map(PricedLine::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{BrokenCatalog, MemoryCatalog};

    #[tokio::test]
    async fn sums_price_times_quantity() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let catalog = MemoryCatalog::default()
            .with_item(a, 10.0)
            .with_item(b, 2.5);
        let lines = priced_lines(&[
            StoredLineItem {
                shop_item: a,
                quantity: 3,
            },
            StoredLineItem {
                shop_item: b,
                quantity: 2,
            },
        ]);

        assert_eq!(compute_total_price(&lines, &catalog).await.unwrap(), 35.0);
    }

    #[tokio::test]
    async fn recomputes_when_items_change() {
        let item = Uuid::new_v4();
        let catalog = MemoryCatalog::default().with_item(item, 10.0);
        let line = |quantity| {
            priced_lines(&[StoredLineItem {
                shop_item: item,
                quantity,
            }])
        };

        assert_eq!(compute_total_price(&line(3), &catalog).await.unwrap(), 30.0);
        assert_eq!(compute_total_price(&line(1), &catalog).await.unwrap(), 10.0);
    }

    #[tokio::test]
    async fn vanished_items_contribute_nothing() {
        let known = Uuid::new_v4();
        let catalog = MemoryCatalog::default().with_item(known, 4.0);
        let lines = priced_lines(&[
            StoredLineItem {
                shop_item: Uuid::new_v4(),
                quantity: 5,
            },
            StoredLineItem {
                shop_item: known,
                quantity: 2,
            },
        ]);

        assert_eq!(compute_total_price(&lines, &catalog).await.unwrap(), 8.0);
    }

    #[tokio::test]
    async fn resolved_prices_skip_the_lookup() {
        let lines = [
            PricedLine {
                shop_item: ShopItemRef::Resolved { price: 699.99 },
                quantity: 1,
            },
            PricedLine {
                shop_item: ShopItemRef::Resolved { price: 12.99 },
                quantity: 2,
            },
        ];

        let total = compute_total_price(&lines, &BrokenCatalog).await.unwrap();
        assert_eq!(total, 699.99 + 12.99 * 2.0);
    }

    #[tokio::test]
    async fn empty_order_totals_zero() {
        let total = compute_total_price(&[], &BrokenCatalog).await.unwrap();
        assert_eq!(total, 0.0);
    }

    #[tokio::test]
    async fn lookup_errors_propagate() {
        let lines = [PricedLine {
            shop_item: ShopItemRef::Id(Uuid::new_v4()),
            quantity: 1,
        }];
        assert!(compute_total_price(&lines, &BrokenCatalog).await.is_err());
    }
}
