//! Database record structures shared by all storage backends.

use sqlx::FromRow;

/// Summary fields of a customer, as listed in the sidebar.
///
/// `created_at` is deliberately absent: it is used only for list ordering
/// inside the backends and is never returned to callers.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub company_name: String,
    pub inn: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub status: String,
}

/// Customer row including the two logo columns, used by the detail lookup.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerWithLogoRow {
    pub id: String,
    pub company_name: String,
    pub inn: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub status: String,
    pub logo_name: Option<String>,
    pub logo_data: Option<String>,
}

impl CustomerWithLogoRow {
    /// Split into the summary row and the logo, if one is set.
    ///
    /// A logo counts as present only when the image payload is non-null,
    /// matching how the columns are written by `set_logo`.
    pub fn into_parts(self) -> (CustomerRow, Option<Logo>) {
        let logo = self.logo_data.map(|data| Logo {
            name: self.logo_name.unwrap_or_default(),
            data,
        });
        (
            CustomerRow {
                id: self.id,
                company_name: self.company_name,
                inn: self.inn,
                address: self.address,
                contact: self.contact,
                status: self.status,
            },
            logo,
        )
    }
}

/// Inline-encoded customer logo.
#[derive(Debug, Clone)]
pub struct Logo {
    pub name: String,
    pub data: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct FileRow {
    pub id: String,
    pub name: String,
    pub size_kb: i32,
    /// Caller-supplied display string, not a real timestamp.
    pub uploaded_at: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A customer with everything its detail card shows.
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: CustomerRow,
    pub logo: Option<Logo>,
    /// Ordered by upload time descending.
    pub files: Vec<FileRow>,
    /// Ordered by last name, then first name, ascending.
    pub employees: Vec<EmployeeRow>,
}

/// Mutable customer fields, written as a whole on create and update.
///
/// Optional fields are defaulted to empty strings by the API layer before
/// they reach a backend, so backends never see `None` here.
#[derive(Debug, Clone)]
pub struct CustomerWrite {
    pub company_name: String,
    pub inn: String,
    pub address: String,
    pub contact: String,
    pub status: String,
}

/// One file record of a batch insert.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub id: String,
    pub name: String,
    pub size_kb: i32,
    pub uploaded_at: String,
}

/// Mutable employee fields, written as a whole on create and update.
#[derive(Debug, Clone)]
pub struct EmployeeWrite {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}
