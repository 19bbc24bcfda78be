use super::types::{request, response};
use crate::{
    modules::{
        otp::{self, service::OtpPurpose},
        user::{repository, service as user_service},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let purpose = user_service::parse_otp_purpose(&payload.otp_type)
        .unwrap_or(OtpPurpose::UserLogin);

    // Registration details are checked up front so a rejected request leaves
    // the code usable.
    let registration = match purpose {
        OtpPurpose::UserRegistration => match (payload.full_name, payload.email) {
            (Some(full_name), Some(email)) => Some((full_name, email)),
            _ => return Err(response::Error::RegistrationDetailsRequired),
        },
        _ => None,
    };

    otp::service::verify(
        ctx.clone(),
        payload.phone_number.clone(),
        purpose.to_string(),
        payload.otp,
    )
    .await
    .map_err(response::Error::Verification)?;

    match registration {
        None => {
            let user = repository::find_by_mobile_number(&ctx.db_conn.pool, payload.phone_number)
                .await
                .map_err(|_| response::Error::UnexpectedError)?
                .ok_or(response::Error::UserNotFound)?;

            let token = user_service::sign_token(&ctx, &user)
                .map_err(|_| response::Error::UnexpectedError)?;

            tracing::info!("User {} logged in", user.id);

            Ok(response::Success::LoggedIn { token, user })
        }
        Some((full_name, email)) => {
            tracing::info!(
                "Phone number {} verified, registering user",
                payload.phone_number
            );

            let (user, token) = user_service::create_user(
                ctx,
                repository::CreateUserPayload {
                    full_name,
                    email: email.trim().to_lowercase(),
                    mobile_number: payload.phone_number,
                    date_of_birth: payload.date_of_birth,
                },
            )
            .await
            .map_err(|err| match err {
                user_service::Error::AlreadyExists => response::Error::UserAlreadyExists,
                user_service::Error::UnexpectedError => response::Error::UnexpectedError,
            })?;

            Ok(response::Success::Registered { token, user })
        }
    }
}
