use super::types::{request, response};
use crate::{modules::upload::service as upload, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    upload::store(ctx, payload.file)
        .await
        .map_err(|_| response::Error::FailedToUploadFile)
        .map(response::Success::FileUploaded)
}
