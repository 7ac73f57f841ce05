use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entity::{Categories, Customers, ShopItems, categories};

/// Read-only view of the store used by the write-path rules.
#[allow(async_fn_in_trait)]
pub trait CatalogLookup {
    async fn customer_exists(&self, id: Uuid) -> Result<bool, DbErr>;

    /// Price of the shop item, or `None` when no such item exists.
    async fn shop_item_price(&self, id: Uuid) -> Result<Option<f64>, DbErr>;

    /// Number of stored categories whose id is in `ids`.
    async fn count_categories(&self, ids: &[Uuid]) -> Result<u64, DbErr>;
}

impl CatalogLookup for DatabaseConnection {
    async fn customer_exists(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(Customers::find_by_id(id).one(self).await?.is_some())
    }

    async fn shop_item_price(&self, id: Uuid) -> Result<Option<f64>, DbErr> {
        Ok(ShopItems::find_by_id(id)
            .one(self)
            .await?
            .map(|item| item.price))
    }

    async fn count_categories(&self, ids: &[Uuid]) -> Result<u64, DbErr> {
        Categories::find()
            .filter(categories::Column::Id.is_in(ids.to_vec()))
            .count(self)
            .await
    }
}
