pub mod alatpay;
pub mod flutterwave;

use crate::{
    modules::{
        plan::{self, repository::Plan},
        subscription,
        transaction::repository::{self as transactions, Gateway, Transaction, TransactionStatus},
        vendor::repository::Vendor,
    },
    types::Context,
};
use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum Error {
    GatewayFailed,
    MissingExternalReference,
    UnexpectedError,
}

#[derive(Serialize, Clone, Debug)]
pub struct InitiatedPayment {
    pub external_reference: String,
    pub details: serde_json::Value,
}

pub struct InitiatePaymentPayload<'a> {
    pub transaction: &'a Transaction,
    pub vendor: &'a Vendor,
    pub plan: &'a Plan,
}

/// Asks the transaction's gateway to collect its amount.
pub async fn initiate(
    ctx: Arc<Context>,
    payload: InitiatePaymentPayload<'_>,
) -> Result<InitiatedPayment, Error> {
    let description = payload
        .transaction
        .description
        .clone()
        .unwrap_or_else(|| format!("Subscription to {}", payload.plan.name));

    match payload.transaction.gateway {
        Gateway::AlatPay => {
            let account = alatpay::generate_virtual_account(
                &ctx.payment.alatpay,
                alatpay::VirtualAccountRequest {
                    amount: payload.transaction.amount.clone(),
                    currency: payload.transaction.currency.clone(),
                    order_id: payload.transaction.reference.clone(),
                    description,
                    customer: alatpay::Customer {
                        email: payload.vendor.email.clone(),
                        phone: payload.vendor.mobile_number.clone(),
                        first_name: payload.vendor.first_name.clone(),
                        last_name: payload.vendor.last_name.clone(),
                    },
                },
            )
            .await
            .map_err(|_| Error::GatewayFailed)?;

            Ok(InitiatedPayment {
                external_reference: account.transaction_id.clone(),
                details: json!(account),
            })
        }
        Gateway::Flutterwave => {
            let link = flutterwave::initialize_payment(
                &ctx.payment.flutterwave,
                flutterwave::InitializePaymentPayload {
                    reference: payload.transaction.reference.clone(),
                    amount: payload.transaction.amount.clone(),
                    currency: payload.transaction.currency.clone(),
                    customer: flutterwave::Customer {
                        email: payload.vendor.email.clone(),
                        name: format!(
                            "{} {}",
                            payload.vendor.first_name, payload.vendor.last_name
                        ),
                        phone_number: payload.vendor.mobile_number.clone(),
                    },
                    title: "FicaGo Subscription".to_string(),
                    description,
                    meta: json!({
                        "vendor_id": payload.vendor.id,
                        "plan_id": payload.plan.id,
                        "transaction_id": payload.transaction.id,
                    }),
                },
            )
            .await
            .map_err(|_| Error::GatewayFailed)?;

            Ok(InitiatedPayment {
                external_reference: payload.transaction.reference.clone(),
                details: json!(link),
            })
        }
    }
}

/// What a gateway reports about a payment.
#[derive(Clone, Debug)]
pub struct Verdict {
    pub status: TransactionStatus,
    pub amount: Option<BigDecimal>,
    pub is_validated: bool,
    pub payload: serde_json::Value,
}

/// Maps a gateway's status word onto a transaction status.
pub fn status_from_gateway(raw: &str) -> TransactionStatus {
    match raw.trim().to_lowercase().as_str() {
        "successful" | "success" | "completed" => TransactionStatus::Successful,
        "failed" | "cancelled" | "reversed" => TransactionStatus::Failed,
        "expired" => TransactionStatus::Expired,
        _ => TransactionStatus::Pending,
    }
}

/// Downgrades a successful payment that fell short of the expected amount.
pub fn settle(
    expected: &BigDecimal,
    status: TransactionStatus,
    paid: Option<&BigDecimal>,
) -> TransactionStatus {
    match (status, paid) {
        (TransactionStatus::Successful, Some(paid)) if paid < expected => {
            TransactionStatus::Failed
        }
        (status, _) => status,
    }
}

/// Asks the gateway that handled `transaction` for its current status.
pub async fn query_status(ctx: Arc<Context>, transaction: &Transaction) -> Result<Verdict, Error> {
    match transaction.gateway {
        Gateway::AlatPay => {
            let external_reference = transaction
                .external_reference
                .clone()
                .ok_or(Error::MissingExternalReference)?;

            let report =
                alatpay::confirm_transaction_status(&ctx.payment.alatpay, &external_reference)
                    .await
                    .map_err(|_| Error::GatewayFailed)?;

            Ok(Verdict {
                status: status_from_gateway(&report.status),
                amount: Some(report.amount_sent.clone()),
                is_validated: report.is_callback_validated,
                payload: json!(report),
            })
        }
        Gateway::Flutterwave => {
            let verified =
                flutterwave::verify_by_reference(&ctx.payment.flutterwave, &transaction.reference)
                    .await
                    .map_err(|_| Error::GatewayFailed)?;

            Ok(Verdict {
                status: status_from_gateway(&verified.status),
                amount: Some(verified.amount.clone()),
                is_validated: true,
                payload: json!(verified),
            })
        }
    }
}

/// Applies a gateway verdict to a transaction.
///
/// The PENDING to final move is conditional, so when callbacks, webhooks and
/// status checks race only one of them records the outcome and activates the
/// subscription. Every other caller gets the stored transaction back.
/// Frees gateway side state held for a transaction that can no longer change.
async fn release_settled(ctx: &Context, transaction: &Transaction) {
    if transaction.gateway != Gateway::AlatPay || transaction.status == TransactionStatus::Pending {
        return;
    }

    if let Some(reference) = transaction.external_reference.as_deref() {
        alatpay::release(&ctx.payment.alatpay, reference).await;
    }
}

pub async fn reconcile(
    ctx: Arc<Context>,
    transaction_id: String,
    verdict: Verdict,
) -> Result<Transaction, Error> {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        Error::UnexpectedError
    })?;

    let transaction = transactions::find_by_id(&mut *tx, transaction_id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::UnexpectedError)?;

    if transaction.status != TransactionStatus::Pending {
        tracing::info!(
            "Transaction {} is already {}, ignoring {} verdict",
            transaction.id,
            transaction.status,
            verdict.status
        );
        drop(tx);
        release_settled(&ctx, &transaction).await;
        return Ok(transaction);
    }

    let status = settle(&transaction.amount, verdict.status, verdict.amount.as_ref());
    if status == TransactionStatus::Pending {
        return Ok(transaction);
    }

    if status != verdict.status {
        tracing::warn!(
            "Transaction {} paid {:?} of {}, marking it {}",
            transaction.id,
            verdict.amount,
            transaction.amount,
            status
        );
    }

    let updated = match transactions::transition(
        &mut *tx,
        transaction.id.clone(),
        status,
        transactions::TransitionPayload {
            metadata: Some(verdict.payload),
            charge_amount: verdict.amount,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?
    {
        Some(updated) => updated,
        None => {
            tracing::info!("Transaction {} was settled concurrently", transaction.id);
            drop(tx);
            return transactions::find_by_id(&ctx.db_conn.pool, transaction.id)
                .await
                .map_err(|_| Error::UnexpectedError)?
                .ok_or(Error::UnexpectedError);
        }
    };

    let mut activation = None;
    if updated.status == TransactionStatus::Successful {
        if let Some(plan_id) = updated.plan_id.clone() {
            let plan = plan::repository::find_by_id(&mut *tx, plan_id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?
                .ok_or_else(|| {
                    tracing::error!(
                        "Plan {} of transaction {} no longer exists",
                        plan_id,
                        updated.id
                    );
                    Error::UnexpectedError
                })?;

            activation = subscription::service::activate(
                &mut tx,
                updated.user_id.clone(),
                &plan,
                updated.id.clone(),
            )
            .await
            .map_err(|_| Error::UnexpectedError)?
            .map(|activation| (plan, activation.expires_at));
        }
    }

    tx.commit().await.map_err(|err| {
        tracing::error!(
            "Failed to commit reconciliation of transaction {}: {}",
            updated.id,
            err
        );
        Error::UnexpectedError
    })?;

    tracing::info!("Transaction {} is now {}", updated.id, updated.status);
    release_settled(&ctx, &updated).await;

    if let Some((plan, expires_at)) = activation {
        subscription::service::notify_activation(
            ctx.clone(),
            updated.user_id.clone(),
            plan,
            expires_at,
        )
        .await;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_words_map_to_statuses() {
        assert_eq!(status_from_gateway("successful"), TransactionStatus::Successful);
        assert_eq!(status_from_gateway("SUCCESS"), TransactionStatus::Successful);
        assert_eq!(status_from_gateway("failed"), TransactionStatus::Failed);
        assert_eq!(status_from_gateway("active"), TransactionStatus::Pending);
        assert_eq!(status_from_gateway("pending"), TransactionStatus::Pending);
    }

    #[test]
    fn short_payments_fail() {
        let expected = BigDecimal::from(2500);

        assert_eq!(
            settle(
                &expected,
                TransactionStatus::Successful,
                Some(&BigDecimal::from(2000))
            ),
            TransactionStatus::Failed
        );
    }

    #[test]
    fn full_or_unreported_payments_keep_their_status() {
        let expected = BigDecimal::from(2500);

        assert_eq!(
            settle(
                &expected,
                TransactionStatus::Successful,
                Some(&BigDecimal::from(3000))
            ),
            TransactionStatus::Successful
        );
        assert_eq!(
            settle(&expected, TransactionStatus::Successful, None),
            TransactionStatus::Successful
        );
        assert_eq!(
            settle(
                &expected,
                TransactionStatus::Failed,
                Some(&BigDecimal::from(1))
            ),
            TransactionStatus::Failed
        );
    }
}
