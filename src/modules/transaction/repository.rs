use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

crate::text_enum!(TransactionStatus {
    Pending => "PENDING",
    Successful => "SUCCESSFUL",
    Failed => "FAILED",
    Expired => "EXPIRED",
});

crate::text_enum!(Gateway {
    AlatPay => "ALATPAY",
    Flutterwave => "FLUTTERWAVE",
});

pub const PLAN_SUBSCRIPTION_TYPE: &str = "PLAN_SUBSCRIPTION";
pub const SUBSCRIPTION_TRANSACTION_TYPE: &str = "SUBSCRIPTION";

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub plan_id: Option<String>,
    pub amount: BigDecimal,
    pub charge_amount: Option<BigDecimal>,
    pub currency: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub status: TransactionStatus,
    pub reference: String,
    pub external_reference: Option<String>,
    pub description: Option<String>,
    pub payment_type: Option<String>,
    pub transaction_type: Option<String>,
    pub gateway: Gateway,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateTransactionPayload {
    pub user_id: String,
    pub plan_id: Option<String>,
    pub amount: BigDecimal,
    pub currency: String,
    pub kind: String,
    pub reference: String,
    pub description: Option<String>,
    pub payment_type: Option<String>,
    pub transaction_type: Option<String>,
    pub gateway: Gateway,
}

#[derive(Default)]
pub struct UpdateTransactionPayload {
    pub status: Option<TransactionStatus>,
    pub external_reference: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub charge_amount: Option<BigDecimal>,
}

#[derive(Default)]
pub struct TransitionPayload {
    pub metadata: Option<serde_json::Value>,
    pub charge_amount: Option<BigDecimal>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateTransactionPayload,
) -> Result<Transaction> {
    sqlx::query_as::<_, Transaction>(
        "
        INSERT INTO transactions (
            id,
            user_id,
            plan_id,
            amount,
            currency,
            type,
            status,
            reference,
            description,
            payment_type,
            transaction_type,
            gateway
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.plan_id)
    .bind(payload.amount)
    .bind(payload.currency)
    .bind(payload.kind)
    .bind(TransactionStatus::Pending)
    .bind(payload.reference.clone())
    .bind(payload.description)
    .bind(payload.payment_type)
    .bind(payload.transaction_type)
    .bind(payload.gateway)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating transaction {}: {}",
            payload.reference,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateTransactionPayload,
) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "
        UPDATE transactions
        SET
            status = COALESCE($2, status),
            external_reference = COALESCE($3, external_reference),
            description = COALESCE($4, description),
            metadata = COALESCE($5, metadata),
            charge_amount = COALESCE($6, charge_amount),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(payload.status)
    .bind(payload.external_reference)
    .bind(payload.description)
    .bind(payload.metadata)
    .bind(payload.charge_amount)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating transaction {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Moves a PENDING transaction to `status`. Returns `None` when the
/// transaction was no longer pending, so only one caller ever wins.
pub async fn transition<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    status: TransactionStatus,
    payload: TransitionPayload,
) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "
        UPDATE transactions
        SET
            status = $2,
            metadata = COALESCE($3, metadata),
            charge_amount = COALESCE($4, charge_amount),
            updated_at = NOW()
        WHERE id = $1 AND status = $5
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(status)
    .bind(payload.metadata)
    .bind(payload.charge_amount)
    .bind(TransactionStatus::Pending)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while moving transaction {} to {}: {}",
            id,
            status,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching transaction {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_id_and_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    user_id: String,
) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id.clone())
        .bind(user_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching transaction {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_reference<'e, E: PgExecutor<'e>>(
    e: E,
    reference: String,
) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE reference = $1")
        .bind(reference.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching transaction with reference {}: {}",
                reference,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_external_reference<'e, E: PgExecutor<'e>>(
    e: E,
    external_reference: String,
) -> Result<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions WHERE external_reference = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(external_reference.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching transaction with external reference {}: {}",
            external_reference,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn expire_stale_pending<'e, E: PgExecutor<'e>>(
    e: E,
    created_before: DateTime<Utc>,
) -> Result<u64> {
    sqlx::query(
        "
        UPDATE transactions
        SET status = $1, updated_at = NOW()
        WHERE status = $2 AND created_at < $3
        ",
    )
    .bind(TransactionStatus::Expired)
    .bind(TransactionStatus::Pending)
    .bind(created_before)
    .execute(e)
    .await
    .map(|result| result.rows_affected())
    .map_err(|err| {
        tracing::error!("Error occurred while expiring stale transactions: {}", err);
        Error::UnexpectedError
    })
}

/// Builds the reference of a plan payment, unique per vendor and attempt.
pub fn plan_payment_reference(plan_id: &str, vendor_id: &str, at: DateTime<Utc>) -> String {
    format!("plan-{}-{}-{}", plan_id, vendor_id, at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn plan_references_carry_the_millisecond_timestamp() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        assert_eq!(
            plan_payment_reference("01PLAN", "01VENDOR", at),
            "plan-01PLAN-01VENDOR-1700000000123"
        );
    }
}
