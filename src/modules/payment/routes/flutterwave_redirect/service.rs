use super::types::{request, response};
use crate::{
    modules::{
        payment::service as payment,
        transaction::repository::{self as transactions, TransactionStatus},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if payload.tx_ref.trim().is_empty() {
        tracing::warn!("Flutterwave redirect without a tx_ref");
        return Err(response::Error::MissingReference);
    }

    let transaction = transactions::find_by_reference(&ctx.db_conn.pool, payload.tx_ref.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::TransactionNotFound)?;

    if transaction.status != TransactionStatus::Pending {
        return Ok(response::Success::PaymentReconciled(transaction));
    }

    tracing::info!(
        "Flutterwave redirected {} with status {:?} (gateway id {:?})",
        payload.tx_ref,
        payload.status,
        payload.transaction_id
    );

    // The redirect query is not signed, so the outcome comes from the API.
    let verdict = payment::query_status(ctx.clone(), &transaction)
        .await
        .map_err(|err| {
            tracing::warn!("Failed to verify {}: {:?}", transaction.reference, err);
            response::Error::FailedToVerifyPayment
        })?;

    payment::reconcile(ctx.clone(), transaction.id, verdict)
        .await
        .map_err(|_| response::Error::UnexpectedError)
        .map(response::Success::PaymentReconciled)
}
