use super::types::{request, response};
use crate::{modules::otp, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    otp::service::verify(ctx, payload.phone_number, payload.otp_type, payload.otp)
        .await
        .map_err(response::Error::Verification)?;

    Ok(response::Success::OtpVerified)
}
