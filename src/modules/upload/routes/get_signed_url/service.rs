use super::types::{request, response};
use crate::{types::Context, utils::storage};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    storage::ensure_resource_exists(
        ctx.storage.clone(),
        payload.public_id.clone(),
        payload.resource_type.clone(),
    )
    .await
    .map_err(|err| match err {
        storage::Error::ResourceNotFound => response::Error::ResourceNotFound,
        _ => response::Error::UnexpectedError,
    })?;

    Ok(response::Success::SignedUrl(storage::private_download_url(
        &ctx.storage,
        &payload.public_id,
        &payload.resource_type,
        chrono::Utc::now().timestamp(),
    )))
}
