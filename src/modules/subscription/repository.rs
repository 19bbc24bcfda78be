use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

crate::text_enum!(SubscriptionStatus {
    Active => "ACTIVE",
    Expired => "EXPIRED",
    Cancelled => "CANCELLED",
});

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct VendorSubscription {
    pub id: String,
    pub vendor_id: String,
    pub plan_id: String,
    pub transaction_id: Option<String>,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateSubscriptionPayload {
    pub vendor_id: String,
    pub plan_id: String,
    pub transaction_id: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

/// Inserts an ACTIVE subscription for a payment. Returns `None` when the
/// payment already activated one.
pub async fn create_for_transaction<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateSubscriptionPayload,
) -> Result<Option<VendorSubscription>> {
    sqlx::query_as::<_, VendorSubscription>(
        "
        INSERT INTO vendor_subscriptions (
            id,
            vendor_id,
            plan_id,
            transaction_id,
            status,
            started_at,
            expires_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (transaction_id) DO NOTHING
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.vendor_id)
    .bind(payload.plan_id)
    .bind(payload.transaction_id.clone())
    .bind(SubscriptionStatus::Active)
    .bind(payload.started_at)
    .bind(payload.expires_at)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating subscription for transaction {}: {}",
            payload.transaction_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_transaction_id<'e, E: PgExecutor<'e>>(
    e: E,
    transaction_id: String,
) -> Result<Option<VendorSubscription>> {
    sqlx::query_as::<_, VendorSubscription>(
        "SELECT * FROM vendor_subscriptions WHERE transaction_id = $1",
    )
    .bind(transaction_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching subscription of transaction {}: {}",
            transaction_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn expire_lapsed<'e, E: PgExecutor<'e>>(e: E, now: DateTime<Utc>) -> Result<u64> {
    sqlx::query(
        "
        UPDATE vendor_subscriptions
        SET status = $1, updated_at = NOW()
        WHERE status = $2 AND expires_at < $3
        ",
    )
    .bind(SubscriptionStatus::Expired)
    .bind(SubscriptionStatus::Active)
    .bind(now)
    .execute(e)
    .await
    .map(|result| result.rows_affected())
    .map_err(|err| {
        tracing::error!("Error occurred while expiring lapsed subscriptions: {}", err);
        Error::UnexpectedError
    })
}
