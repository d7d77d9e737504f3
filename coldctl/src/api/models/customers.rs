//! Customer API types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmployeeResponse, FileResponse, require_non_empty};
use crate::db::models::{CustomerDetail, CustomerRow, CustomerWrite, Logo};

/// Request body for creating a customer. The client supplies the id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub id: String,
    pub company_name: String,
    pub inn: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub status: String,
}

impl CustomerCreate {
    pub fn validate(&self) -> crate::errors::Result<()> {
        require_non_empty(&[
            ("id", &self.id),
            ("companyName", &self.company_name),
            ("inn", &self.inn),
        ])
    }

    pub fn into_write(self) -> (String, CustomerWrite) {
        (
            self.id,
            CustomerWrite {
                company_name: self.company_name,
                inn: self.inn,
                address: self.address.unwrap_or_default(),
                contact: self.contact.unwrap_or_default(),
                status: self.status,
            },
        )
    }
}

/// Request body for updating a customer. All fields are written as a whole.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub company_name: String,
    pub inn: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    pub status: String,
}

impl CustomerUpdate {
    pub fn validate(&self) -> crate::errors::Result<()> {
        require_non_empty(&[("companyName", &self.company_name), ("inn", &self.inn)])
    }

    pub fn into_write(self) -> CustomerWrite {
        CustomerWrite {
            company_name: self.company_name,
            inn: self.inn,
            address: self.address.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            status: self.status,
        }
    }
}

/// Customer summary as shown in the customer list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub company_name: String,
    pub inn: String,
    pub address: String,
    pub contact: String,
    pub status: String,
}

impl From<CustomerRow> for CustomerResponse {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            inn: row.inn,
            address: row.address.unwrap_or_default(),
            contact: row.contact.unwrap_or_default(),
            status: row.status,
        }
    }
}

/// Customer logo payload, both for upload and in the detail response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoPayload {
    pub name: String,
    /// Inline-encoded image content
    pub data: String,
}

impl From<Logo> for LogoPayload {
    fn from(logo: Logo) -> Self {
        Self {
            name: logo.name,
            data: logo.data,
        }
    }
}

/// Acknowledgement for a logo upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoSaved {
    pub ok: bool,
}

/// Full customer card: summary fields plus logo, files and employees.
///
/// `logo` is serialized as an explicit `null` when unset; the client relies
/// on the key being present.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    pub id: String,
    pub company_name: String,
    pub inn: String,
    pub address: String,
    pub contact: String,
    pub status: String,
    pub logo: Option<LogoPayload>,
    pub files: Vec<FileResponse>,
    pub employees: Vec<EmployeeResponse>,
}

impl From<CustomerDetail> for CustomerDetailResponse {
    fn from(detail: CustomerDetail) -> Self {
        let summary = CustomerResponse::from(detail.customer);
        Self {
            id: summary.id,
            company_name: summary.company_name,
            inn: summary.inn,
            address: summary.address,
            contact: summary.contact,
            status: summary.status,
            logo: detail.logo.map(LogoPayload::from),
            files: detail.files.into_iter().map(FileResponse::from).collect(),
            employees: detail.employees.into_iter().map(EmployeeResponse::from).collect(),
        }
    }
}
