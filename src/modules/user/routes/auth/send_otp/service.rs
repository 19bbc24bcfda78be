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

    let user = repository::find_by_mobile_number(&ctx.db_conn.pool, payload.phone_number.clone())
        .await
        .map_err(|_| response::Error::FailedToGenerateOtp)?;

    match (purpose, user) {
        (OtpPurpose::UserLogin, None) => return Err(response::Error::UserNotFound),
        (OtpPurpose::UserRegistration, Some(_)) => {
            return Err(response::Error::UserAlreadyExists)
        }
        _ => (),
    }

    let record = otp::service::issue(ctx.clone(), payload.phone_number, purpose.to_string())
        .await
        .map_err(|_| response::Error::FailedToGenerateOtp)?;

    Ok(response::Success::OtpSent {
        phone_number: record.phone_number,
        expires_at: record.expires_at,
        otp: otp::service::should_expose(&ctx).then_some(record.otp),
    })
}
