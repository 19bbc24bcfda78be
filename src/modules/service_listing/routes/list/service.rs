use super::types::response;
use crate::{
    modules::{auth::middleware::VendorAuth, service_listing::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: VendorAuth) -> response::Response {
    repository::find_many_by_vendor_id(&ctx.db_conn.pool, auth.vendor_id)
        .await
        .map_err(|_| response::Error::FailedToFetchServices)
        .map(response::Success::Services)
}
