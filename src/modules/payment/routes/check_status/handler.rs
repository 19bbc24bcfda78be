use super::{service::service, types::request};
use crate::{modules::auth::middleware::VendorAuth, types::Context};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    auth: VendorAuth,
    State(ctx): State<Arc<Context>>,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            transaction_id,
            auth,
        },
    )
    .await
}
