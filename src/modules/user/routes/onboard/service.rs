use super::types::{request, response};
use crate::{
    modules::user::{repository, service as user_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let (user, token) = user_service::create_user(
        ctx,
        repository::CreateUserPayload {
            full_name: payload.full_name,
            email: payload.email.trim().to_lowercase(),
            mobile_number: payload.mobile_number,
            date_of_birth: payload.date_of_birth,
        },
    )
    .await
    .map_err(|err| match err {
        user_service::Error::AlreadyExists => response::Error::UserAlreadyExists,
        user_service::Error::UnexpectedError => response::Error::FailedToOnboardUser,
    })?;

    Ok(response::Success::Onboarded { token, user })
}
