use super::{ekyc, payment, plan, upload, user, vendor};
use crate::types::Context;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

fn api_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/ekyc", ekyc::routes::get_router())
        .nest("/user", user::routes::get_router())
        .nest("/vendor", vendor::routes::get_router())
        .nest("/plans", plan::routes::get_router())
        .nest("/webhook", payment::routes::webhook::get_router())
        .nest("/upload-file", upload::routes::get_router())
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/v1/api", api_router())
}
