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
    let transaction = transactions::find_by_id_and_user_id(
        &ctx.db_conn.pool,
        payload.transaction_id,
        payload.auth.vendor_id,
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::TransactionNotFound)?;

    if transaction.status != TransactionStatus::Pending {
        return Ok(response::Success::Status(transaction));
    }

    // A gateway that cannot answer yet leaves the transaction pending.
    let verdict = match payment::query_status(ctx.clone(), &transaction).await {
        Ok(verdict) => verdict,
        Err(err) => {
            tracing::warn!(
                "Could not query {} for transaction {}: {:?}",
                transaction.gateway,
                transaction.id,
                err
            );
            return Ok(response::Success::Status(transaction));
        }
    };

    payment::reconcile(ctx.clone(), transaction.id, verdict)
        .await
        .map_err(|_| response::Error::UnexpectedError)
        .map(response::Success::Status)
}
