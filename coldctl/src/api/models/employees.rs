//! Customer employee API types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::require_non_empty;
use crate::db::models::{EmployeeRow, EmployeeWrite};

/// Request body for adding an employee to a customer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EmployeeCreate {
    pub fn validate(&self) -> crate::errors::Result<()> {
        require_non_empty(&[
            ("id", &self.id),
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
        ])
    }

    pub fn into_write(self) -> (String, EmployeeWrite) {
        (
            self.id,
            EmployeeWrite {
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
            },
        )
    }
}

/// Request body for rewriting an employee record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> crate::errors::Result<()> {
        require_non_empty(&[("firstName", &self.first_name), ("lastName", &self.last_name)])
    }

    pub fn into_write(self) -> EmployeeWrite {
        EmployeeWrite {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

/// Employee record as returned in the customer card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl From<EmployeeRow> for EmployeeResponse {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
        }
    }
}
