use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct ServiceListing {
    pub id: String,
    pub vendor_id: String,
    pub title: String,
    pub description: String,
    pub average_price: BigDecimal,
    pub category: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateServiceListingPayload {
    pub vendor_id: String,
    pub title: String,
    pub description: String,
    pub average_price: BigDecimal,
    pub category: String,
    pub image_url: String,
}

#[derive(Default)]
pub struct UpdateServiceListingPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub average_price: Option<BigDecimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateServiceListingPayload,
) -> Result<ServiceListing> {
    sqlx::query_as::<_, ServiceListing>(
        "
        INSERT INTO services (
            id,
            vendor_id,
            title,
            description,
            average_price,
            category,
            image_url
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.vendor_id.clone())
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.average_price)
    .bind(payload.category)
    .bind(payload.image_url)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating a service for vendor {}: {}",
            payload.vendor_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_many_by_vendor_id<'e, E: PgExecutor<'e>>(
    e: E,
    vendor_id: String,
) -> Result<Vec<ServiceListing>> {
    sqlx::query_as::<_, ServiceListing>(
        "SELECT * FROM services WHERE vendor_id = $1 ORDER BY created_at DESC",
    )
    .bind(vendor_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching services of vendor {}: {}",
            vendor_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id_and_vendor_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    vendor_id: String,
) -> Result<Option<ServiceListing>> {
    sqlx::query_as::<_, ServiceListing>(
        "SELECT * FROM services WHERE id = $1 AND vendor_id = $2",
    )
    .bind(id.clone())
    .bind(vendor_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching service {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id_and_vendor_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    vendor_id: String,
    payload: UpdateServiceListingPayload,
) -> Result<Option<ServiceListing>> {
    sqlx::query_as::<_, ServiceListing>(
        "
        UPDATE services
        SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            average_price = COALESCE($5, average_price),
            category = COALESCE($6, category),
            image_url = COALESCE($7, image_url),
            is_active = COALESCE($8, is_active),
            updated_at = NOW()
        WHERE id = $1 AND vendor_id = $2
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(vendor_id)
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.average_price)
    .bind(payload.category)
    .bind(payload.image_url)
    .bind(payload.is_active)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating service {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn delete_by_id_and_vendor_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    vendor_id: String,
) -> Result<bool> {
    sqlx::query("DELETE FROM services WHERE id = $1 AND vendor_id = $2")
        .bind(id.clone())
        .bind(vendor_id)
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Error occurred while deleting service {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn count_by_vendor_id<'e, E: PgExecutor<'e>>(e: E, vendor_id: String) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services WHERE vendor_id = $1")
        .bind(vendor_id.clone())
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while counting services of vendor {}: {}",
                vendor_id,
                err
            );
            Error::UnexpectedError
        })
}
