use crate::{types::Context, utils::storage};
use axum_typed_multipart::FieldData;
use serde::Serialize;
use std::io::Read;
use std::sync::Arc;
use tempfile::NamedTempFile;
use ulid::Ulid;

pub const MAX_FILES_PER_REQUEST: usize = 10;

#[derive(Debug)]
pub enum Error {
    FailedToReadFile,
    FailedToUploadFile,
}

#[derive(Serialize, Clone, Debug)]
pub struct UploadedFile {
    pub url: String,
    pub public_id: String,
    pub original_name: String,
    pub size: usize,
}

pub async fn store(
    ctx: Arc<Context>,
    mut file: FieldData<NamedTempFile>,
) -> Result<UploadedFile, Error> {
    let mut buf: Vec<u8> = vec![];

    file.contents.read_to_end(&mut buf).map_err(|err| {
        tracing::error!("Failed to read the uploaded file {err:?}");
        Error::FailedToReadFile
    })?;

    let original_name = file
        .metadata
        .file_name
        .clone()
        .unwrap_or_else(|| Ulid::new().to_string());
    let size = buf.len();

    let media = storage::upload_file(ctx.storage.clone(), original_name.clone(), buf)
        .await
        .map_err(|_| Error::FailedToUploadFile)?;

    tracing::info!("Uploaded {} ({} bytes) as {}", original_name, size, media.public_id);

    Ok(UploadedFile {
        url: media.url,
        public_id: media.public_id,
        original_name,
        size,
    })
}
