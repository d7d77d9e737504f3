//! Storage trait for the customer aggregate.

use crate::db::errors::Result;
use crate::db::models::{CustomerDetail, CustomerRow, CustomerWrite, EmployeeWrite, NewFile};

/// Storage backend for customers and their owned files and employees.
///
/// Every operation is an independent short-lived unit of work borrowed from
/// the backend's bounded connection pool. The only multi-statement transaction
/// is [`add_files`](CustomerStore::add_files), which commits all rows or none.
///
/// Write operations that match no row return the affected-row count instead
/// of failing; callers decide whether zero rows is worth reporting. Cascade
/// deletion of a customer's files and employees is enforced by the backend
/// (foreign keys for the relational implementations), not by application code.
#[async_trait::async_trait]
pub trait CustomerStore: Send + Sync {
    /// Idempotently create the three tables. Run once at startup.
    async fn init_schema(&self) -> Result<()>;

    /// All customers' summary fields, ordered by creation time descending.
    async fn list_customers(&self) -> Result<Vec<CustomerRow>>;

    /// Full detail card for one customer, or `None` when the id is unknown.
    async fn get_customer(&self, id: &str) -> Result<Option<CustomerDetail>>;

    /// Insert a new customer under a caller-supplied id.
    ///
    /// # Errors
    /// A duplicate id surfaces as a constraint violation.
    async fn create_customer(&self, id: &str, customer: &CustomerWrite) -> Result<()>;

    /// Overwrite every mutable field unconditionally (last writer wins).
    /// Returns the number of rows matched; zero for an unknown id.
    async fn update_customer(&self, id: &str, customer: &CustomerWrite) -> Result<u64>;

    /// Delete a customer; the backend cascades to its files and employees.
    /// Returns the number of rows matched; zero for an unknown id.
    async fn delete_customer(&self, id: &str) -> Result<u64>;

    /// Overwrite the logo columns unconditionally. No size or MIME checks.
    /// Returns the number of rows matched; zero for an unknown id.
    async fn set_logo(&self, id: &str, name: &str, data: &str) -> Result<u64>;

    /// Insert a batch of file records atomically: one transaction, commit on
    /// full success, full rollback when any single insert fails.
    async fn add_files(&self, customer_id: &str, files: &[NewFile]) -> Result<()>;

    /// Delete one file record by its own id.
    /// Returns the number of rows matched; zero for an unknown id.
    async fn delete_file(&self, file_id: &str) -> Result<u64>;

    /// Insert a new employee contact under a caller-supplied id.
    async fn add_employee(&self, customer_id: &str, id: &str, employee: &EmployeeWrite) -> Result<()>;

    /// Overwrite every mutable employee field unconditionally.
    /// Returns the number of rows matched; zero for an unknown id.
    async fn update_employee(&self, employee_id: &str, employee: &EmployeeWrite) -> Result<u64>;

    /// Delete one employee record by its own id.
    /// Returns the number of rows matched; zero for an unknown id.
    async fn delete_employee(&self, employee_id: &str) -> Result<u64>;

    /// Release the backend's resources. Called once during shutdown.
    async fn close(&self);
}
