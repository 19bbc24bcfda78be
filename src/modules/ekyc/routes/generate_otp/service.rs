use super::types::{request, response};
use crate::{modules::otp, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let record = otp::service::issue(
        ctx.clone(),
        payload.phone_number.clone(),
        payload.otp_type.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToGenerateOtp)?;

    Ok(response::Success::OtpGenerated {
        phone_number: record.phone_number,
        otp_type: record.otp_type,
        expires_at: record.expires_at,
        otp: otp::service::should_expose(&ctx).then_some(record.otp),
    })
}
