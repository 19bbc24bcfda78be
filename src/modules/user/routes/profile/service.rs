use super::types::{request, response};
use crate::{
    modules::{
        auth::{middleware::Auth, service::jwt::Role},
        user::repository,
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, auth: Auth, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    if auth.claims.role != Role::User {
        return Err(response::Error::NotAUser);
    }

    repository::update_by_id(
        &ctx.db_conn.pool,
        auth.claims.id,
        repository::UpdateUserPayload {
            full_name: payload.full_name,
            gender: payload.gender,
            date_of_birth: payload.date_of_birth,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateProfile)?
    .ok_or(response::Error::UserNotFound)
    .map(response::Success::ProfileUpdated)
}
