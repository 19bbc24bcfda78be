use super::model;
use crate::{
    modules::{
        payment::service::{self as payment, Verdict},
        transaction::repository::{self as transactions, TransactionStatus},
    },
    types::Context,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bigdecimal::{BigDecimal, FromPrimitive};
use serde_json::json;
use std::sync::Arc;

fn acknowledged() -> Response {
    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

pub async fn charge_completed(ctx: Arc<Context>, data: serde_json::Value) -> Response {
    let charge = match serde_json::from_value::<model::ChargeCompleted>(data.clone()) {
        Ok(charge) => charge,
        Err(err) => {
            tracing::warn!("Malformed charge.completed payload: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Malformed charge payload" })),
            )
                .into_response();
        }
    };

    let transaction =
        match transactions::find_by_reference(&ctx.db_conn.pool, charge.tx_ref.clone()).await {
            Ok(Some(transaction)) => transaction,
            Ok(None) => {
                tracing::warn!("Webhook for unknown transaction reference {}", charge.tx_ref);
                return acknowledged();
            }
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        };

    let status = if charge.status == "successful" {
        TransactionStatus::Successful
    } else {
        TransactionStatus::Failed
    };

    match payment::reconcile(
        ctx.clone(),
        transaction.id.clone(),
        Verdict {
            status,
            amount: charge.amount.and_then(BigDecimal::from_f64),
            is_validated: true,
            payload: data,
        },
    )
    .await
    {
        Ok(transaction) => {
            tracing::info!(
                "Webhook settled transaction {} as {}",
                transaction.id,
                transaction.status
            );
            acknowledged()
        }
        Err(err) => {
            tracing::error!(
                "Failed to reconcile transaction {} from webhook: {:?}",
                transaction.id,
                err
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
