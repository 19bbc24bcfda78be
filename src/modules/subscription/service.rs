use super::repository::{self, CreateSubscriptionPayload, VendorSubscription};
use crate::{
    modules::{
        notification,
        payment::service::alatpay,
        plan::repository::Plan,
        transaction,
        vendor::{self, repository::SetCurrentPlanPayload},
    },
    types::Context,
};
use chrono::{DateTime, Duration, Months, Utc};
use sqlx::Postgres;
use std::sync::Arc;

pub const PENDING_TRANSACTION_TTL_HOURS: i64 = 24;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Expiry of a plan bought at `start`. Unknown intervals last a month.
pub fn compute_expiry(start: DateTime<Utc>, interval: &str) -> DateTime<Utc> {
    let months = |n: u32| {
        start
            .checked_add_months(Months::new(n))
            .unwrap_or(start + Duration::days(30 * n as i64))
    };

    match interval.trim().to_lowercase().as_str() {
        "daily" => start + Duration::days(1),
        "weekly" => start + Duration::weeks(1),
        "quarterly" => months(3),
        "yearly" | "annually" => months(12),
        _ => months(1),
    }
}

pub struct Activation {
    pub subscription: VendorSubscription,
    pub expires_at: DateTime<Utc>,
}

/// Activates `plan` for a vendor as the outcome of one payment. Runs inside
/// the caller's database transaction; a payment that already activated a
/// subscription yields `None`.
pub async fn activate(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    vendor_id: String,
    plan: &Plan,
    transaction_id: String,
) -> Result<Option<Activation>, Error> {
    let started_at = Utc::now();
    let expires_at = compute_expiry(started_at, &plan.interval);

    let subscription = match repository::create_for_transaction(
        &mut **tx,
        CreateSubscriptionPayload {
            vendor_id: vendor_id.clone(),
            plan_id: plan.id.clone(),
            transaction_id: transaction_id.clone(),
            started_at,
            expires_at,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?
    {
        Some(subscription) => subscription,
        None => {
            tracing::info!(
                "Transaction {} already activated a subscription",
                transaction_id
            );
            return Ok(None);
        }
    };

    vendor::repository::set_current_plan(
        &mut **tx,
        vendor_id.clone(),
        SetCurrentPlanPayload {
            plan_id: plan.id.clone(),
            started_at,
            expires_at,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    tracing::info!(
        "Activated plan {} for vendor {} until {}",
        plan.id,
        vendor_id,
        expires_at
    );

    Ok(Some(Activation {
        subscription,
        expires_at,
    }))
}

/// Emails the vendor about an activation that has been committed.
pub async fn notify_activation(
    ctx: Arc<Context>,
    vendor_id: String,
    plan: Plan,
    expires_at: DateTime<Utc>,
) {
    let vendor = match vendor::repository::find_by_id(&ctx.db_conn.pool, vendor_id.clone()).await {
        Ok(Some(vendor)) => vendor,
        _ => {
            tracing::warn!(
                "Skipping subscription email, vendor {} could not be loaded",
                vendor_id
            );
            return;
        }
    };

    tokio::spawn(notification::service::send(
        ctx.clone(),
        notification::service::Notification::subscription_activated(&vendor, &plan, expires_at),
        notification::service::Backend::Email,
    ));
}

pub struct SweepReport {
    pub expired_subscriptions: u64,
    pub cleared_vendor_plans: u64,
    pub expired_transactions: u64,
    pub pruned_virtual_accounts: usize,
}

/// Expires lapsed subscriptions, drops the plan of vendors left without one,
/// expires payments that stayed pending for too long and forgets virtual
/// accounts that can no longer be paid into.
pub async fn sweep(ctx: Arc<Context>) -> Result<SweepReport, Error> {
    let now = Utc::now();

    let expired_subscriptions = repository::expire_lapsed(&ctx.db_conn.pool, now)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let cleared_vendor_plans = vendor::repository::clear_expired_plans(&ctx.db_conn.pool)
        .await
        .map_err(|_| Error::UnexpectedError)?;

    let expired_transactions = transaction::repository::expire_stale_pending(
        &ctx.db_conn.pool,
        now - Duration::hours(PENDING_TRANSACTION_TTL_HOURS),
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    let pruned_virtual_accounts = alatpay::prune_expired(&ctx.payment.alatpay, now).await;

    Ok(SweepReport {
        expired_subscriptions,
        cleared_vendor_plans,
        expired_transactions,
        pruned_virtual_accounts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn monthly_is_the_default() {
        let expected = Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap();

        assert_eq!(compute_expiry(start(), "Monthly"), expected);
        assert_eq!(compute_expiry(start(), "fortnightly"), expected);
    }

    #[test]
    fn short_intervals_add_days() {
        assert_eq!(
            compute_expiry(start(), "WEEKLY"),
            Utc.with_ymd_and_hms(2025, 2, 7, 12, 0, 0).unwrap()
        );
        assert_eq!(
            compute_expiry(start(), "daily"),
            Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn long_intervals_add_months() {
        assert_eq!(
            compute_expiry(start(), "quarterly"),
            Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap()
        );
        assert_eq!(
            compute_expiry(start(), "YEARLY"),
            Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap()
        );
        assert_eq!(compute_expiry(start(), "annually"), compute_expiry(start(), "yearly"));
    }
}
