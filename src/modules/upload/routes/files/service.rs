use super::types::{request, response};
use crate::{
    modules::upload::service::{self as upload, MAX_FILES_PER_REQUEST},
    types::Context,
};
use futures::future::try_join_all;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let files = payload.body.files;

    if files.is_empty() {
        return Err(response::Error::NoFilesProvided);
    }

    if files.len() > MAX_FILES_PER_REQUEST {
        tracing::warn!(
            "{} tried to upload {} files at once",
            payload.auth.claims.id,
            files.len()
        );
        return Err(response::Error::TooManyFiles);
    }

    try_join_all(files.into_iter().map(|file| upload::store(ctx.clone(), file)))
        .await
        .map_err(|_| response::Error::FailedToUploadFiles)
        .map(response::Success::FilesUploaded)
}
