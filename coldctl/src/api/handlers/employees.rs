use crate::AppState;
use crate::api::models::employees::{EmployeeCreate, EmployeeResponse, EmployeeUpdate};
use crate::errors::{Error, Result, messages};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/customers/{id}/employees",
    tag = "employees",
    summary = "Add an employee to a customer",
    request_body = EmployeeCreate,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Required fields missing"),
        (status = 500, description = "Storage failure, including unknown customer")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id))]
pub async fn add_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EmployeeCreate>,
) -> Result<(StatusCode, Json<EmployeeResponse>)> {
    body.validate()?;
    let (employee_id, write) = body.into_write();
    state
        .store
        .add_employee(&id, &employee_id, &write)
        .await
        .map_err(|e| Error::storage(messages::ADD_EMPLOYEE, e))?;
    let response = EmployeeResponse {
        id: employee_id,
        first_name: write.first_name,
        last_name: write.last_name,
        phone: write.phone,
        email: write.email,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/customers/{id}/employees/{employee_id}",
    tag = "employees",
    summary = "Rewrite an employee record",
    request_body = EmployeeUpdate,
    responses(
        (status = 200, description = "Echo of the written fields", body = EmployeeResponse),
        (status = 400, description = "Required fields missing"),
        (status = 500, description = "Storage failure")
    ),
    params(
        ("id" = String, Path, description = "Customer id"),
        ("employee_id" = String, Path, description = "Employee id")
    )
)]
#[tracing::instrument(skip_all, fields(employee_id = %employee_id))]
pub async fn update_employee(
    State(state): State<AppState>,
    Path((_id, employee_id)): Path<(String, String)>,
    Json(body): Json<EmployeeUpdate>,
) -> Result<Json<EmployeeResponse>> {
    body.validate()?;
    let write = body.into_write();
    let rows = state
        .store
        .update_employee(&employee_id, &write)
        .await
        .map_err(|e| Error::storage(messages::UPDATE_EMPLOYEE, e))?;
    if rows == 0 {
        tracing::warn!("Update matched no employee, nothing written");
    }
    let response = EmployeeResponse {
        id: employee_id,
        first_name: write.first_name,
        last_name: write.last_name,
        phone: write.phone,
        email: write.email,
    };
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}/employees/{employee_id}",
    tag = "employees",
    summary = "Delete an employee record",
    responses(
        (status = 204, description = "Deleted, or nothing matched"),
        (status = 500, description = "Storage failure")
    ),
    params(
        ("id" = String, Path, description = "Customer id"),
        ("employee_id" = String, Path, description = "Employee id")
    )
)]
#[tracing::instrument(skip_all, fields(employee_id = %employee_id))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path((_id, employee_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state
        .store
        .delete_employee(&employee_id)
        .await
        .map_err(|e| Error::storage(messages::DELETE_EMPLOYEE, e))?;
    Ok(StatusCode::NO_CONTENT)
}
