use thiserror::Error;

/// Unified error type for storage operations that application code can handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// Primary key, foreign key, not-null or check constraint violation
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// The storage backend could not be reached or the pool is exhausted
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using sqlx's own error categorization
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => StoreError::ConstraintViolation {
                    constraint: db_err.constraint().map(|s| s.to_string()),
                    table: db_err.table().map(|s| s.to_string()),
                    message: db_err.message().to_string(),
                },
                _ => StoreError::Other(anyhow::Error::from(err)),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Type alias for storage operation results
pub type Result<T> = std::result::Result<T, StoreError>;
