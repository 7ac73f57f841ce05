use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Empty},
    state::AppState,
};

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items: Vec<Customer> = Customers::find()
        .order_by_asc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    let count = items.len();
    Ok(ApiResponse::listed(CustomerList { items }, count))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(customer_from_entity)
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    Ok(ApiResponse::success(customer))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let payload = payload.validate()?;
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        surname: Set(payload.surname),
        email: Set(payload.email),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let customer = active.insert(&state.orm).await?;
    tracing::info!(customer_id = %customer.id, "customer created");

    Ok(ApiResponse::success(customer_from_entity(customer)))
}

pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    let payload = payload.validate()?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(surname) = payload.surname {
        active.surname = Set(surname);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    active.updated_at = Set(Utc::now().into());

    let customer = active.update(&state.orm).await?;
    Ok(ApiResponse::success(customer_from_entity(customer)))
}

pub async fn delete_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Empty>> {
    let result = Customers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Customer not found"));
    }
    tracing::info!(customer_id = %id, "customer deleted");

    Ok(ApiResponse::success(Empty {}))
}

/// Removes every customer. Succeeds on an empty store too.
pub async fn delete_all_customers(state: &AppState) -> AppResult<ApiResponse<Empty>> {
    let result = Customers::delete_many().exec(&state.orm).await?;
    tracing::info!(deleted = result.rows_affected, "all customers deleted");

    Ok(ApiResponse::success(Empty {}).with_message("All customers deleted successfully"))
}

pub(crate) fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        surname: model.surname,
        email: model.email,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
