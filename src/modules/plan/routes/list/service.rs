use super::types::response;
use crate::{
    modules::{auth::middleware::Auth, plan::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, auth: Auth) -> response::Response {
    let plans = repository::find_many_by_role(&ctx.db_conn.pool, auth.claims.role)
        .await
        .map_err(|_| response::Error::FailedToFetchPlans)?;

    tracing::info!("Fetched {} {} plans", plans.len(), auth.claims.role);

    Ok(response::Success::Plans(plans))
}
