use crate::AppState;
use crate::api::models::files::{FilePayload, FilesCreate};
use crate::db::models::NewFile;
use crate::errors::{Error, Result, messages};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/customers/{id}/files",
    tag = "files",
    summary = "Attach a batch of file records to a customer",
    request_body = FilesCreate,
    responses(
        (status = 201, description = "All files inserted", body = Vec<FilePayload>),
        (status = 500, description = "Any failed insert rolls back the whole batch")
    ),
    params(("id" = String, Path, description = "Customer id"))
)]
#[tracing::instrument(skip_all, fields(customer_id = %id, count = body.files.len()))]
pub async fn add_files(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FilesCreate>,
) -> Result<(StatusCode, Json<Vec<FilePayload>>)> {
    let records: Vec<NewFile> = body.files.iter().cloned().map(NewFile::from).collect();
    state
        .store
        .add_files(&id, &records)
        .await
        .map_err(|e| Error::storage(messages::ADD_FILES, e))?;
    Ok((StatusCode::CREATED, Json(body.files)))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}/files/{file_id}",
    tag = "files",
    summary = "Delete a file record",
    responses(
        (status = 204, description = "Deleted, or nothing matched"),
        (status = 500, description = "Storage failure")
    ),
    params(
        ("id" = String, Path, description = "Customer id"),
        ("file_id" = String, Path, description = "File id")
    )
)]
#[tracing::instrument(skip_all, fields(file_id = %file_id))]
pub async fn delete_file(
    State(state): State<AppState>,
    Path((_id, file_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    // The file id alone identifies the row; the customer segment is routing
    // context only.
    state
        .store
        .delete_file(&file_id)
        .await
        .map_err(|e| Error::storage(messages::DELETE_FILE, e))?;
    Ok(StatusCode::NO_CONTENT)
}
