use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::ShopItem, validation::FieldErrors};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateShopItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Category ids. Each must reference an existing category.
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateShopItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub categories: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct NewShopItem {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub categories: Vec<String>,
}

fn check_price(errors: &mut FieldErrors, price: Option<f64>) {
    if let Some(price) = price {
        errors.check(price >= 0.0, "Price cannot be negative");
    }
}

impl CreateShopItemRequest {
    pub fn validate(self) -> AppResult<NewShopItem> {
        let mut errors = FieldErrors::default();
        let title = errors.required(self.title, "Title is required");
        let description = errors.required(self.description, "Description is required");
        errors.check(self.price.is_some(), "Price is required");
        check_price(&mut errors, self.price);

        match (title, description, self.price) {
            (Some(title), Some(description), Some(price)) if errors.is_empty() => Ok(NewShopItem {
                title,
                description,
                price,
                categories: self.categories.unwrap_or_default(),
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl UpdateShopItemRequest {
    pub fn validate(self) -> AppResult<Self> {
        let mut errors = FieldErrors::default();
        let title = errors.optional(self.title, "Title is required");
        let description = errors.optional(self.description, "Description is required");
        check_price(&mut errors, self.price);
        errors.finish()?;
        Ok(Self {
            title,
            description,
            price: self.price,
            categories: self.categories,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ShopItemList {
    #[schema(value_type = Vec<ShopItem>)]
    pub items: Vec<ShopItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn create_reports_missing_and_negative_fields() {
        let err = CreateShopItemRequest::default().validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(m)
                if m == vec!["Title is required", "Description is required", "Price is required"]
        ));

        let err = CreateShopItemRequest {
            title: Some("Mug".into()),
            description: Some("Ceramic".into()),
            price: Some(-1.0),
            categories: None,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == vec!["Price cannot be negative"]));
    }

    #[test]
    fn create_allows_free_items_without_categories() {
        let item = CreateShopItemRequest {
            title: Some("Sticker".into()),
            description: Some("Free with every order".into()),
            price: Some(0.0),
            categories: None,
        }
        .validate()
        .unwrap();
        assert_eq!(item.price, 0.0);
        assert!(item.categories.is_empty());
    }

    #[test]
    fn update_checks_only_supplied_price() {
        assert!(UpdateShopItemRequest::default().validate().is_ok());
        let err = UpdateShopItemRequest {
            price: Some(-0.01),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
