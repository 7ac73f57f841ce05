use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::Category, validation::FieldErrors};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct NewCategory {
    pub title: String,
    pub description: String,
}

impl CreateCategoryRequest {
    pub fn validate(self) -> AppResult<NewCategory> {
        let mut errors = FieldErrors::default();
        let title = errors.required(self.title, "Title is required");
        let description = errors.required(self.description, "Description is required");
        match (title, description) {
            (Some(title), Some(description)) => Ok(NewCategory { title, description }),
            _ => Err(errors.into_error()),
        }
    }
}

impl UpdateCategoryRequest {
    pub fn validate(self) -> AppResult<Self> {
        let mut errors = FieldErrors::default();
        let title = errors.optional(self.title, "Title is required");
        let description = errors.optional(self.description, "Description is required");
        errors.finish()?;
        Ok(Self { title, description })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}
