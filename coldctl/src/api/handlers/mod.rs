//! Axum route handlers for the customer API.

pub mod customers;
pub mod employees;
pub mod files;
