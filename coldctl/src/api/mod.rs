//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! The whole surface lives under `/api`:
//!
//! - **Customers** (`/api/customers`): list, card, create, update, delete, logo
//! - **Files** (`/api/customers/{id}/files`): atomic batch attach, delete
//! - **Employees** (`/api/customers/{id}/employees`): add, rewrite, delete
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`; the
//! rendered docs are served at `/docs`.

pub mod handlers;
pub mod models;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::AppState;

/// Routes mounted under `/api`.
///
/// Every path keeps `{id}` as the first parameter name so sibling routes
/// share a prefix without conflicting.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(handlers::customers::list_customers))
        .route("/customers", post(handlers::customers::create_customer))
        .route("/customers/{id}", get(handlers::customers::get_customer))
        .route("/customers/{id}", put(handlers::customers::update_customer))
        .route("/customers/{id}", delete(handlers::customers::delete_customer))
        .route("/customers/{id}/logo", put(handlers::customers::set_logo))
        .route("/customers/{id}/files", post(handlers::files::add_files))
        .route("/customers/{id}/files/{file_id}", delete(handlers::files::delete_file))
        .route("/customers/{id}/employees", post(handlers::employees::add_employee))
        .route(
            "/customers/{id}/employees/{employee_id}",
            put(handlers::employees::update_employee),
        )
        .route(
            "/customers/{id}/employees/{employee_id}",
            delete(handlers::employees::delete_employee),
        )
}
