use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Otp {
    pub id: String,
    pub phone_number: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub otp_type: String,
    pub otp: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct UpsertOtpPayload {
    pub phone_number: String,
    pub otp_type: String,
    pub otp: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn upsert<'e, E: PgExecutor<'e>>(e: E, payload: UpsertOtpPayload) -> Result<Otp> {
    sqlx::query_as::<_, Otp>(
        "
        INSERT INTO otps (id, phone_number, type, otp, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (phone_number, type) DO UPDATE
        SET
            otp = EXCLUDED.otp,
            expires_at = EXCLUDED.expires_at,
            updated_at = NOW()
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.phone_number.clone())
    .bind(payload.otp_type.clone())
    .bind(payload.otp)
    .bind(payload.expires_at)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while storing {} otp for {}: {}",
            payload.otp_type,
            payload.phone_number,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_phone_number_and_type<'e, E: PgExecutor<'e>>(
    e: E,
    phone_number: String,
    otp_type: String,
) -> Result<Option<Otp>> {
    sqlx::query_as::<_, Otp>("SELECT * FROM otps WHERE phone_number = $1 AND type = $2")
        .bind(phone_number.clone())
        .bind(otp_type.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching {} otp for {}: {}",
                otp_type,
                phone_number,
                err
            );
            Error::UnexpectedError
        })
}

/// Deletes the record only while it still holds `otp`. Returns whether this
/// call removed it, so a code is accepted at most once.
pub async fn consume<'e, E: PgExecutor<'e>>(e: E, id: String, otp: String) -> Result<bool> {
    sqlx::query_scalar::<_, String>("DELETE FROM otps WHERE id = $1 AND otp = $2 RETURNING id")
        .bind(id.clone())
        .bind(otp)
        .fetch_optional(e)
        .await
        .map(|deleted| deleted.is_some())
        .map_err(|err| {
            tracing::error!("Error occurred while consuming otp {}: {}", id, err);
            Error::UnexpectedError
        })
}
