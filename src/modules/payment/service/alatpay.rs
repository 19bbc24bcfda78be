//! In-process stand-in for the AlatPay bank transfer gateway.
//!
//! Virtual accounts are kept in a shared ledger so a later status
//! confirmation can only succeed for an account this process handed out.

use crate::types::AlatPayContext;
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use ulid::Ulid;

pub type Ledger = Arc<Mutex<HashMap<String, VirtualAccount>>>;

pub const VIRTUAL_BANK_CODE: &str = "999";
pub const VIRTUAL_BANK_NAME: &str = "Mock Bank";
pub const VIRTUAL_ACCOUNT_NAME: &str = "FicaGo Mock Account";
pub const VIRTUAL_ACCOUNT_VALIDITY_HOURS: i64 = 24;

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidRequest,
    UnknownTransaction,
}

#[derive(Serialize, Clone, Debug)]
pub struct Customer {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct VirtualAccountRequest {
    pub amount: BigDecimal,
    pub currency: String,
    pub order_id: String,
    pub description: String,
    pub customer: Customer,
}

#[derive(Serialize, Clone, Debug)]
pub struct VirtualAccount {
    pub id: String,
    pub transaction_id: String,
    pub virtual_bank_code: String,
    pub virtual_bank_account_number: String,
    pub bank_name: String,
    pub account_name: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub order_id: String,
    pub description: String,
    pub status: String,
    pub customer: Customer,
    pub expired_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
pub struct TransactionStatus {
    pub transaction_id: String,
    pub order_id: String,
    pub status: String,
    pub is_callback_validated: bool,
    pub amount: BigDecimal,
    pub amount_sent: BigDecimal,
    pub is_amount_discrepant: bool,
    pub currency: String,
    pub virtual_account: VirtualAccount,
}

fn account_number() -> String {
    let mut rng = rand::thread_rng();
    (0..10).map(|_| rng.gen_range(0..10).to_string()).collect()
}

pub async fn generate_virtual_account(
    ctx: &AlatPayContext,
    request: VirtualAccountRequest,
) -> Result<VirtualAccount, Error> {
    if request.amount <= BigDecimal::zero() || request.order_id.is_empty() {
        tracing::warn!(
            "Refusing to generate a virtual account for order {:?} of {}",
            request.order_id,
            request.amount
        );
        return Err(Error::InvalidRequest);
    }

    let now = Utc::now();
    let account = VirtualAccount {
        id: format!("VA_{}", Ulid::new()),
        transaction_id: format!("TX_REQ_{}", Ulid::new()),
        virtual_bank_code: VIRTUAL_BANK_CODE.to_string(),
        virtual_bank_account_number: account_number(),
        bank_name: VIRTUAL_BANK_NAME.to_string(),
        account_name: VIRTUAL_ACCOUNT_NAME.to_string(),
        amount: request.amount,
        currency: request.currency,
        order_id: request.order_id,
        description: request.description,
        status: "active".to_string(),
        customer: request.customer,
        expired_at: now + Duration::hours(VIRTUAL_ACCOUNT_VALIDITY_HOURS),
        created_at: now,
    };

    tracing::info!(
        "Generated virtual account {} for order {}",
        account.transaction_id,
        account.order_id
    );

    ctx.ledger
        .lock()
        .await
        .insert(account.transaction_id.clone(), account.clone());

    Ok(account)
}

/// Reports a remembered virtual account as paid in full.
pub async fn confirm_transaction_status(
    ctx: &AlatPayContext,
    transaction_id: &str,
) -> Result<TransactionStatus, Error> {
    let mut ledger = ctx.ledger.lock().await;
    let account = ledger.get_mut(transaction_id).ok_or_else(|| {
        tracing::warn!("Unknown virtual account transaction {}", transaction_id);
        Error::UnknownTransaction
    })?;

    account.status = "successful".to_string();

    tracing::info!("Confirmed virtual account transaction {}", transaction_id);

    Ok(TransactionStatus {
        transaction_id: account.transaction_id.clone(),
        order_id: account.order_id.clone(),
        status: account.status.clone(),
        is_callback_validated: true,
        amount: account.amount.clone(),
        amount_sent: account.amount.clone(),
        is_amount_discrepant: false,
        currency: account.currency.clone(),
        virtual_account: account.clone(),
    })
}

/// Forgets a virtual account whose payment has been settled locally.
pub async fn release(ctx: &AlatPayContext, transaction_id: &str) -> bool {
    let released = ctx.ledger.lock().await.remove(transaction_id).is_some();

    if released {
        tracing::debug!("Released virtual account transaction {}", transaction_id);
    }

    released
}

/// Drops virtual accounts whose validity window closed before `now`.
pub async fn prune_expired(ctx: &AlatPayContext, now: DateTime<Utc>) -> usize {
    let mut ledger = ctx.ledger.lock().await;
    let before = ledger.len();

    ledger.retain(|_, account| account.expired_at >= now);

    before - ledger.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: u32) -> VirtualAccountRequest {
        VirtualAccountRequest {
            amount: BigDecimal::from(amount),
            currency: "NGN".to_string(),
            order_id: "plan-01PLAN-01VENDOR-1".to_string(),
            description: "Subscription to Basic".to_string(),
            customer: Customer {
                email: "ada@example.com".to_string(),
                phone: "08012345678".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Obi".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn generated_accounts_can_be_confirmed() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        let account = generate_virtual_account(&ctx, request(1500)).await.unwrap();
        assert_eq!(account.virtual_bank_account_number.len(), 10);
        assert_eq!(account.expired_at - account.created_at, Duration::hours(24));

        let status = confirm_transaction_status(&ctx, &account.transaction_id)
            .await
            .unwrap();
        assert_eq!(status.status, "successful");
        assert!(status.is_callback_validated);
        assert_eq!(status.amount_sent, BigDecimal::from(1500));
        assert_eq!(status.order_id, account.order_id);
    }

    #[tokio::test]
    async fn settled_accounts_leave_the_ledger() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        for _ in 0..50 {
            let account = generate_virtual_account(&ctx, request(1500)).await.unwrap();
            confirm_transaction_status(&ctx, &account.transaction_id)
                .await
                .unwrap();
            assert!(release(&ctx, &account.transaction_id).await);
        }

        assert_eq!(ctx.ledger.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn released_accounts_cannot_be_confirmed_again() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        let account = generate_virtual_account(&ctx, request(1500)).await.unwrap();
        assert!(release(&ctx, &account.transaction_id).await);
        assert!(!release(&ctx, &account.transaction_id).await);

        assert_eq!(
            confirm_transaction_status(&ctx, &account.transaction_id)
                .await
                .unwrap_err(),
            Error::UnknownTransaction
        );
    }

    #[tokio::test]
    async fn expired_accounts_are_pruned() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        let live = generate_virtual_account(&ctx, request(1500)).await.unwrap();
        let stale = generate_virtual_account(&ctx, request(2500)).await.unwrap();
        ctx.ledger
            .lock()
            .await
            .get_mut(&stale.transaction_id)
            .unwrap()
            .expired_at = Utc::now() - Duration::minutes(1);

        assert_eq!(prune_expired(&ctx, Utc::now()).await, 1);

        let ledger = ctx.ledger.lock().await;
        assert!(ledger.contains_key(&live.transaction_id));
        assert!(!ledger.contains_key(&stale.transaction_id));
    }

    #[tokio::test]
    async fn unknown_transactions_are_rejected() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        assert_eq!(
            confirm_transaction_status(&ctx, "TX_REQ_missing")
                .await
                .unwrap_err(),
            Error::UnknownTransaction
        );
    }

    #[tokio::test]
    async fn zero_amounts_are_refused() {
        let ctx = AlatPayContext {
            ledger: Ledger::default(),
        };

        assert_eq!(
            generate_virtual_account(&ctx, request(0)).await.unwrap_err(),
            Error::InvalidRequest
        );
    }
}
