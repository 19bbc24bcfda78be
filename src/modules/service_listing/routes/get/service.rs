use super::types::{request, response};
use crate::{modules::service_listing::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_by_id_and_vendor_id(&ctx.db_conn.pool, payload.id, payload.auth.vendor_id)
        .await
        .map_err(|_| response::Error::FailedToFetchService)?
        .ok_or(response::Error::ServiceNotFound)
        .map(response::Success::Service)
}
