use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::Customer,
    validation::{FieldErrors, is_valid_email},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

/// A create request that passed field validation.
#[derive(Debug)]
pub struct NewCustomer {
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl CreateCustomerRequest {
    pub fn validate(self) -> AppResult<NewCustomer> {
        let mut errors = FieldErrors::default();
        let name = errors.required(self.name, "Name is required");
        let surname = errors.required(self.surname, "Surname is required");
        let email = errors.required(self.email, "Email is required");
        if let Some(email) = &email {
            errors.check(is_valid_email(email), "Please add a valid email");
        }

        match (name, surname, email) {
            (Some(name), Some(surname), Some(email)) if errors.is_empty() => Ok(NewCustomer {
                name,
                surname,
                email,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl UpdateCustomerRequest {
    pub fn validate(self) -> AppResult<Self> {
        let mut errors = FieldErrors::default();
        let name = errors.optional(self.name, "Name is required");
        let surname = errors.optional(self.surname, "Surname is required");
        let email = errors.optional(self.email, "Email is required");
        if let Some(email) = &email {
            errors.check(is_valid_email(email), "Please add a valid email");
        }
        errors.finish()?;
        Ok(Self {
            name,
            surname,
            email,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerList {
    #[schema(value_type = Vec<Customer>)]
    pub items: Vec<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn create_requires_every_field() {
        let err = CreateCustomerRequest::default().validate().unwrap_err();
        match err {
            AppError::Validation(messages) => assert_eq!(
                messages,
                vec!["Name is required", "Surname is required", "Email is required"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn create_rejects_malformed_email() {
        let err = CreateCustomerRequest {
            name: Some("John".into()),
            surname: Some("Doe".into()),
            email: Some("john.doe".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == vec!["Please add a valid email"]));
    }

    #[test]
    fn create_trims_values() {
        let customer = CreateCustomerRequest {
            name: Some(" John ".into()),
            surname: Some("Doe".into()),
            email: Some(" john.doe@example.com".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(customer.name, "John");
        assert_eq!(customer.email, "john.doe@example.com");
    }

    #[test]
    fn update_accepts_sparse_payloads() {
        let update = UpdateCustomerRequest {
            surname: Some("Smith".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(update.surname.as_deref(), Some("Smith"));
        assert!(update.name.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn update_rejects_blank_supplied_fields() {
        let err = UpdateCustomerRequest {
            name: Some(" ".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == vec!["Name is required"]));
    }
}
