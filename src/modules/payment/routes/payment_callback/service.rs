use super::types::{request, response};
use crate::{
    modules::{
        payment::service::{self as payment, alatpay, Verdict},
        transaction::repository::{self as transactions, TransactionStatus},
    },
    types::Context,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let report =
        match alatpay::confirm_transaction_status(&ctx.payment.alatpay, &payload.transaction_id)
            .await
        {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(
                    "Could not confirm gateway transaction {}: {:?}",
                    payload.transaction_id,
                    err
                );
                return already_settled(&ctx, payload.transaction_id).await;
            }
        };

    let transaction =
        transactions::find_by_external_reference(&ctx.db_conn.pool, report.transaction_id.clone())
            .await
            .map_err(|_| response::Error::UnexpectedError)?
            .ok_or_else(|| {
                tracing::warn!(
                    "No transaction matches gateway transaction {}",
                    report.transaction_id
                );
                response::Error::TransactionNotFound
            })?;

    let is_validated = report.is_callback_validated;
    let transaction = payment::reconcile(
        ctx.clone(),
        transaction.id,
        Verdict {
            status: payment::status_from_gateway(&report.status),
            amount: Some(report.amount_sent.clone()),
            is_validated,
            payload: json!(report),
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::PaymentReconciled {
        is_validated,
        transaction,
    })
}

/// A released virtual account means the transaction was already settled, so a
/// repeated callback reports the stored outcome.
async fn already_settled(ctx: &Context, gateway_transaction_id: String) -> response::Response {
    match transactions::find_by_external_reference(&ctx.db_conn.pool, gateway_transaction_id).await
    {
        Ok(Some(transaction)) if transaction.status != TransactionStatus::Pending => {
            Ok(response::Success::PaymentReconciled {
                is_validated: true,
                transaction,
            })
        }
        Ok(_) => Err(response::Error::FailedToConfirmPayment),
        Err(_) => Err(response::Error::UnexpectedError),
    }
}
