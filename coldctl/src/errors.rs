use crate::db::errors::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

/// Client-facing error messages.
///
/// The UI is Russian-language; every failure path maps to one of these
/// fixed operation-level messages, with driver detail carried separately
/// in the envelope's `error` field.
pub mod messages {
    pub const LOAD_CUSTOMERS: &str = "Не удалось загрузить заказчиков.";
    pub const LOAD_CUSTOMER: &str = "Не удалось загрузить карточку заказчика.";
    pub const CUSTOMER_NOT_FOUND: &str = "Заказчик не найден.";
    pub const CREATE_CUSTOMER: &str = "Не удалось создать заказчика.";
    pub const UPDATE_CUSTOMER: &str = "Не удалось обновить заказчика.";
    pub const DELETE_CUSTOMER: &str = "Не удалось удалить заказчика.";
    pub const SAVE_LOGO: &str = "Не удалось загрузить логотип.";
    pub const ADD_FILES: &str = "Не удалось добавить файлы.";
    pub const DELETE_FILE: &str = "Не удалось удалить файл.";
    pub const ADD_EMPLOYEE: &str = "Не удалось добавить сотрудника.";
    pub const UPDATE_EMPLOYEE: &str = "Не удалось обновить сотрудника.";
    pub const DELETE_EMPLOYEE: &str = "Не удалось удалить сотрудника.";
    pub const REQUIRED_FIELDS: &str = "Заполните обязательные поля.";
}

#[derive(ThisError, Debug)]
pub enum Error {
    /// Requested resource not found
    #[error("{message}")]
    NotFound { message: String },

    /// Invalid request data (missing required fields and the like)
    #[error("{message}: {error}")]
    Validation { message: String, error: String },

    /// Storage operation failure, wrapped with the operation-level message
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: StoreError,
    },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound { message: message.into() }
    }

    pub fn validation(message: impl Into<String>, error: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            error: error.into(),
        }
    }

    /// Wrap a storage failure with the message of the operation that hit it.
    pub fn storage(message: impl Into<String>, source: StoreError) -> Self {
        Error::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Storage { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Storage { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::NotFound { .. } | Error::Validation { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();

        // The envelope always carries `message`; `error` holds the raw detail
        // for 400 and 500 responses.
        let body = match &self {
            Error::NotFound { message } => json!({ "message": message }),
            Error::Validation { message, error } => json!({ "message": message, "error": error }),
            Error::Storage { message, source } => json!({ "message": message, "error": source.to_string() }),
            Error::Other(err) => json!({ "message": "Внутренняя ошибка сервера.", "error": format!("{err:#}") }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_classes() {
        assert_eq!(Error::not_found(messages::CUSTOMER_NOT_FOUND).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::validation(messages::REQUIRED_FIELDS, "companyName").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::storage(messages::LOAD_CUSTOMERS, StoreError::Unavailable("pool closed".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
