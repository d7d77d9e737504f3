//! PostgreSQL-dialect storage backend.
//!
//! Identical semantics to the MySQL backend; only the DDL and placeholder
//! syntax differ. The backend is selected by [`crate::config::DatabaseConfig`].

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::instrument;

use crate::config::PoolSettings;
use crate::db::errors::Result;
use crate::db::models::{
    CustomerDetail, CustomerRow, CustomerWithLogoRow, CustomerWrite, EmployeeRow, EmployeeWrite, FileRow, NewFile,
};
use crate::db::store::CustomerStore;

const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id TEXT PRIMARY KEY,
    company_name TEXT NOT NULL,
    inn TEXT NOT NULL,
    address TEXT,
    contact TEXT,
    status TEXT NOT NULL,
    logo_name TEXT,
    logo_data TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_CUSTOMER_FILES: &str = r#"
CREATE TABLE IF NOT EXISTS customer_files (
    id TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    size_kb INTEGER NOT NULL,
    uploaded_at TEXT NOT NULL
)
"#;

const CREATE_CUSTOMER_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS customer_employees (
    id TEXT PRIMARY KEY,
    customer_id TEXT NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    phone TEXT,
    email TEXT
)
"#;

/// Customer storage backed by a bounded PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, settings: &PoolSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl CustomerStore for PgStore {
    #[instrument(skip(self), err)]
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_CUSTOMERS).execute(&self.pool).await?;
        sqlx::query(CREATE_CUSTOMER_FILES).execute(&self.pool).await?;
        sqlx::query(CREATE_CUSTOMER_EMPLOYEES).execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list_customers(&self) -> Result<Vec<CustomerRow>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, company_name, inn, address, contact, status
             FROM customers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn get_customer(&self, id: &str) -> Result<Option<CustomerDetail>> {
        let Some(row) = sqlx::query_as::<_, CustomerWithLogoRow>(
            "SELECT id, company_name, inn, address, contact, status, logo_name, logo_data
             FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let files = sqlx::query_as::<_, FileRow>(
            "SELECT id, name, size_kb, uploaded_at
             FROM customer_files WHERE customer_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let employees = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, first_name, last_name, phone, email
             FROM customer_employees WHERE customer_id = $1
             ORDER BY last_name ASC, first_name ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let (customer, logo) = row.into_parts();
        Ok(Some(CustomerDetail {
            customer,
            logo,
            files,
            employees,
        }))
    }

    #[instrument(skip(self, customer), fields(customer_id = %id), err)]
    async fn create_customer(&self, id: &str, customer: &CustomerWrite) -> Result<()> {
        sqlx::query(
            "INSERT INTO customers (id, company_name, inn, address, contact, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&customer.company_name)
        .bind(&customer.inn)
        .bind(&customer.address)
        .bind(&customer.contact)
        .bind(&customer.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self, customer), fields(customer_id = %id), err)]
    async fn update_customer(&self, id: &str, customer: &CustomerWrite) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE customers
             SET company_name = $1, inn = $2, address = $3, contact = $4, status = $5
             WHERE id = $6",
        )
        .bind(&customer.company_name)
        .bind(&customer.inn)
        .bind(&customer.address)
        .bind(&customer.contact)
        .bind(&customer.status)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn delete_customer(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self, name, data), fields(customer_id = %id), err)]
    async fn set_logo(&self, id: &str, name: &str, data: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE customers SET logo_name = $1, logo_data = $2 WHERE id = $3")
            .bind(name)
            .bind(data)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self, files), fields(customer_id = %customer_id, count = files.len()), err)]
    async fn add_files(&self, customer_id: &str, files: &[NewFile]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for file in files {
            sqlx::query(
                "INSERT INTO customer_files (id, customer_id, name, size_kb, uploaded_at)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(&file.id)
            .bind(customer_id)
            .bind(&file.name)
            .bind(file.size_kb)
            .bind(&file.uploaded_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self), fields(file_id = %file_id), err)]
    async fn delete_file(&self, file_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM customer_files WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self, employee), fields(customer_id = %customer_id, employee_id = %id), err)]
    async fn add_employee(&self, customer_id: &str, id: &str, employee: &EmployeeWrite) -> Result<()> {
        sqlx::query(
            "INSERT INTO customer_employees (id, customer_id, first_name, last_name, phone, email)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(customer_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self, employee), fields(employee_id = %employee_id), err)]
    async fn update_employee(&self, employee_id: &str, employee: &EmployeeWrite) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE customer_employees
             SET first_name = $1, last_name = $2, phone = $3, email = $4
             WHERE id = $5",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(employee_id = %employee_id), err)]
    async fn delete_employee(&self, employee_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM customer_employees WHERE id = $1")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
