mod handler;
mod model;
mod types;

use crate::{modules::payment::service::flutterwave, types::Context};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use axum_extra::TypedHeader;
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use types::request::VerifHash;

fn invalid_signature() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid webhook signature" })),
    )
        .into_response()
}

async fn handle_webhook(
    State(ctx): State<Arc<Context>>,
    signature: Option<TypedHeader<VerifHash>>,
    body: Bytes,
) -> Response {
    let TypedHeader(VerifHash(signature)) = match signature {
        Some(signature) => signature,
        None => {
            tracing::warn!("Webhook received without a verif-hash header");
            return invalid_signature();
        }
    };

    if !flutterwave::verify_signature(&ctx.payment.flutterwave.webhook_secret, &body, &signature) {
        tracing::warn!("Rejected webhook with signature {}", signature);
        return invalid_signature();
    }

    let event = match serde_json::from_slice::<model::Event>(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!("Failed to parse webhook body: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Malformed webhook body" })),
            )
                .into_response();
        }
    };

    match event.event.as_str() {
        model::CHARGE_COMPLETED => handler::charge_completed(ctx.clone(), event.data).await,
        other => {
            tracing::info!("Ignoring webhook event {}", other);
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", post(handle_webhook))
        .route("/failed", post(handle_webhook))
}
