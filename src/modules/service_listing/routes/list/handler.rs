use super::service::service;
use crate::{modules::auth::middleware::VendorAuth, types::Context};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(auth: VendorAuth, State(ctx): State<Arc<Context>>) -> impl IntoResponse {
    service(ctx, auth).await
}
