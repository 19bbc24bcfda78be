use super::types::{request, response};
use crate::{modules::service_listing::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let deleted = repository::delete_by_id_and_vendor_id(
        &ctx.db_conn.pool,
        payload.id.clone(),
        payload.auth.vendor_id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToDeleteService)?;

    if !deleted {
        return Err(response::Error::ServiceNotFound);
    }

    tracing::info!(
        "Vendor {} deleted service {}",
        payload.auth.vendor_id,
        payload.id
    );

    Ok(response::Success::ServiceDeleted)
}
