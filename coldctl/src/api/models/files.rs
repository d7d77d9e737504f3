//! Customer file API types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{FileRow, NewFile};

/// One file record in a batch upload. The client supplies the id and the
/// upload time display string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub id: String,
    pub name: String,
    pub size_kb: i32,
    pub uploaded_at: String,
}

impl From<FilePayload> for NewFile {
    fn from(file: FilePayload) -> Self {
        Self {
            id: file.id,
            name: file.name,
            size_kb: file.size_kb,
            uploaded_at: file.uploaded_at,
        }
    }
}

/// Request body for the batch file insert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FilesCreate {
    pub files: Vec<FilePayload>,
}

/// File record as returned in the customer card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: String,
    pub name: String,
    pub size_kb: i32,
    pub uploaded_at: String,
}

impl From<FileRow> for FileResponse {
    fn from(row: FileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            size_kb: row.size_kb,
            uploaded_at: row.uploaded_at,
        }
    }
}
