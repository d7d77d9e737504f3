use crate::AppState;
use crate::api::models::customers::{
    CustomerCreate, CustomerDetailResponse, CustomerResponse, CustomerUpdate, LogoPayload, LogoSaved,
};
use crate::errors::{Error, Result, messages};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    summary = "List customers",
    responses(
        (status = 200, description = "Customers, newest first", body = Vec<CustomerResponse>),
        (status = 500, description = "Storage failure")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<CustomerResponse>>> {
    let rows = state
        .store
        .list_customers()
        .await
        .map_err(|e| Error::storage(messages::LOAD_CUSTOMERS, e))?;
    Ok(Json(rows.into_iter().map(CustomerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    summary = "Get a customer card",
    responses(
        (status = 200, description = "Customer with logo, files and employees", body = CustomerDetailResponse),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Storage failure")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id))]
pub async fn get_customer(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<CustomerDetailResponse>> {
    let detail = state
        .store
        .get_customer(&id)
        .await
        .map_err(|e| Error::storage(messages::LOAD_CUSTOMER, e))?
        .ok_or_else(|| Error::not_found(messages::CUSTOMER_NOT_FOUND))?;
    Ok(Json(CustomerDetailResponse::from(detail)))
}

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    summary = "Create a customer",
    request_body = CustomerCreate,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Required fields missing"),
        (status = 500, description = "Storage failure, including duplicate id")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CustomerCreate>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    body.validate()?;
    let (id, write) = body.into_write();
    state
        .store
        .create_customer(&id, &write)
        .await
        .map_err(|e| Error::storage(messages::CREATE_CUSTOMER, e))?;
    let response = CustomerResponse {
        id,
        company_name: write.company_name,
        inn: write.inn,
        address: write.address,
        contact: write.contact,
        status: write.status,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    summary = "Update a customer",
    request_body = CustomerUpdate,
    responses(
        (status = 200, description = "Echo of the written fields", body = CustomerResponse),
        (status = 400, description = "Required fields missing"),
        (status = 500, description = "Storage failure")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id))]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CustomerUpdate>,
) -> Result<Json<CustomerResponse>> {
    body.validate()?;
    let write = body.into_write();
    let rows = state
        .store
        .update_customer(&id, &write)
        .await
        .map_err(|e| Error::storage(messages::UPDATE_CUSTOMER, e))?;
    if rows == 0 {
        tracing::warn!("Update matched no customer, nothing written");
    }
    let response = CustomerResponse {
        id,
        company_name: write.company_name,
        inn: write.inn,
        address: write.address,
        contact: write.contact,
        status: write.status,
    };
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    summary = "Delete a customer and everything it owns",
    responses(
        (status = 204, description = "Deleted, or nothing matched"),
        (status = 500, description = "Storage failure")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id))]
pub async fn delete_customer(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state
        .store
        .delete_customer(&id)
        .await
        .map_err(|e| Error::storage(messages::DELETE_CUSTOMER, e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/customers/{id}/logo",
    tag = "customers",
    summary = "Set or replace the customer logo",
    request_body = LogoPayload,
    responses(
        (status = 200, description = "Logo written", body = LogoSaved),
        (status = 500, description = "Storage failure")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id))]
pub async fn set_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<LogoPayload>,
) -> Result<Json<LogoSaved>> {
    let rows = state
        .store
        .set_logo(&id, &body.name, &body.data)
        .await
        .map_err(|e| Error::storage(messages::SAVE_LOGO, e))?;
    if rows == 0 {
        tracing::warn!("Logo update matched no customer, nothing written");
    }
    Ok(Json(LogoSaved { ok: true }))
}
