use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct CreateUserPayload {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Default)]
pub struct UpdateUserPayload {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    DuplicateUser,
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateUserPayload) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, full_name, email, mobile_number, date_of_birth)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.full_name)
    .bind(payload.email.clone())
    .bind(payload.mobile_number)
    .bind(payload.date_of_birth)
    .fetch_one(e)
    .await
    .map_err(|err| {
        if err
            .as_database_error()
            .map(|err| err.is_unique_violation())
            .unwrap_or(false)
        {
            return Error::DuplicateUser;
        }

        tracing::error!(
            "Error occurred while creating user {}: {}",
            payload.email,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_mobile_number<'e, E: PgExecutor<'e>>(
    e: E,
    mobile_number: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE mobile_number = $1")
        .bind(mobile_number.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching user with mobile number {}: {}",
                mobile_number,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_email_or_mobile_number<'e, E: PgExecutor<'e>>(
    e: E,
    email: String,
    mobile_number: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE email = $1 OR mobile_number = $2 LIMIT 1",
    )
    .bind(email)
    .bind(mobile_number)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while looking up user by email or mobile number: {}",
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users
        SET
            full_name = COALESCE($2, full_name),
            gender = COALESCE($3, gender),
            date_of_birth = COALESCE($4, date_of_birth),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .bind(payload.full_name)
    .bind(payload.gender)
    .bind(payload.date_of_birth)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating user {}: {}", id, err);
        Error::UnexpectedError
    })
}
