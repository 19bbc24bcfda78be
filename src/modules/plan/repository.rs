use crate::modules::auth::service::jwt::Role;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub currency: String,
    pub interval: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub role: Role,
    pub external_plan_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreatePlanPayload {
    pub name: String,
    pub price: BigDecimal,
    pub currency: String,
    pub interval: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub role: Role,
    pub external_plan_id: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreatePlanPayload) -> Result<Plan> {
    sqlx::query_as::<_, Plan>(
        "
        INSERT INTO plans (
            id,
            name,
            price,
            currency,
            interval,
            features,
            is_popular,
            role,
            external_plan_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name.clone())
    .bind(payload.price)
    .bind(payload.currency)
    .bind(payload.interval)
    .bind(payload.features)
    .bind(payload.is_popular)
    .bind(payload.role)
    .bind(payload.external_plan_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating plan {}: {}", payload.name, err);
        Error::UnexpectedError
    })
}

pub async fn count<'e, E: PgExecutor<'e>>(e: E) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plans")
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while counting plans: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching plan {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_many_by_role<'e, E: PgExecutor<'e>>(e: E, role: Role) -> Result<Vec<Plan>> {
    sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE role = $1 ORDER BY price ASC")
        .bind(role)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching {} plans: {}", role, err);
            Error::UnexpectedError
        })
}
