use super::repository::{self, Otp};
use crate::{
    modules::notification,
    types::{AppEnvironment, Context},
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::sync::Arc;

pub const OTP_LENGTH: usize = 6;

crate::text_enum!(OtpPurpose {
    UserLogin => "USER_LOGIN",
    UserRegistration => "USER_REGISTRATION",
    VendorLogin => "vendor_login",
});
pub const OTP_VALIDITY_MINUTES: i64 = 10;

#[derive(Debug, PartialEq)]
pub enum IssueError {
    UnexpectedError,
}

#[derive(Debug, PartialEq)]
pub enum VerificationError {
    InvalidOtpOrPhoneNumber,
    InvalidOtp,
    Expired,
    UnexpectedError,
}

impl VerificationError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidOtpOrPhoneNumber => "Invalid OTP or phone number",
            Self::InvalidOtp => "Invalid OTP",
            Self::Expired => "OTP has expired",
            Self::UnexpectedError => "Failed to verify OTP",
        }
    }
}

pub fn generate() -> String {
    let code = rand::thread_rng().gen_range(0..10u32.pow(OTP_LENGTH as u32));
    format!("{:0width$}", code, width = OTP_LENGTH)
}

/// Checks a stored code against the one a caller submitted.
pub fn check(otp: &Otp, code: &str, now: DateTime<Utc>) -> Result<(), VerificationError> {
    if otp.otp != code {
        return Err(VerificationError::InvalidOtp);
    }

    if now > otp.expires_at {
        return Err(VerificationError::Expired);
    }

    Ok(())
}

/// Whether the code should be echoed back to the caller.
pub fn should_expose(ctx: &Context) -> bool {
    ctx.app.environment == AppEnvironment::Development
}

pub async fn issue(
    ctx: Arc<Context>,
    phone_number: String,
    otp_type: String,
) -> Result<Otp, IssueError> {
    let otp = repository::upsert(
        &ctx.db_conn.pool,
        repository::UpsertOtpPayload {
            phone_number: phone_number.clone(),
            otp_type: otp_type.clone(),
            otp: generate(),
            expires_at: Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES),
        },
    )
    .await
    .map_err(|_| IssueError::UnexpectedError)?;

    tracing::info!("Issued {} otp {} for {}", otp_type, otp.id, phone_number);

    tokio::spawn(notification::service::send(
        ctx.clone(),
        notification::service::Notification::otp_requested(phone_number, otp.otp.clone()),
        notification::service::Backend::Sms,
    ));

    Ok(otp)
}

pub async fn verify(
    ctx: Arc<Context>,
    phone_number: String,
    otp_type: String,
    code: String,
) -> Result<(), VerificationError> {
    let otp = repository::find_by_phone_number_and_type(
        &ctx.db_conn.pool,
        phone_number.clone(),
        otp_type.clone(),
    )
    .await
    .map_err(|_| VerificationError::UnexpectedError)?
    .ok_or(VerificationError::InvalidOtpOrPhoneNumber)?;

    check(&otp, &code, Utc::now()).map_err(|err| {
        tracing::warn!("Rejected {} otp for {}: {:?}", otp_type, phone_number, err);
        err
    })?;

    let consumed = repository::consume(&ctx.db_conn.pool, otp.id, otp.otp)
        .await
        .map_err(|_| VerificationError::UnexpectedError)?;

    if !consumed {
        tracing::warn!(
            "{} otp for {} was already used or reissued",
            otp_type,
            phone_number
        );
        return Err(VerificationError::InvalidOtpOrPhoneNumber);
    }

    tracing::info!("Verified {} otp for {}", otp_type, phone_number);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp(code: &str, expires_at: DateTime<Utc>) -> Otp {
        Otp {
            id: "01HZOTP".to_string(),
            phone_number: "08012345678".to_string(),
            otp_type: "USER_LOGIN".to_string(),
            otp: code.to_string(),
            expires_at,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn vendor_login_codes_use_the_lowercase_type() {
        assert_eq!(OtpPurpose::VendorLogin.as_str(), "vendor_login");
        assert_eq!(
            "vendor_login".parse::<OtpPurpose>(),
            Ok(OtpPurpose::VendorLogin)
        );
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn matching_unexpired_code_passes() {
        let now = Utc::now();
        let record = otp("123456", now + Duration::minutes(5));

        assert_eq!(check(&record, "123456", now), Ok(()));
    }

    #[test]
    fn mismatched_code_is_invalid() {
        let now = Utc::now();
        let record = otp("123456", now + Duration::minutes(5));

        assert_eq!(
            check(&record, "654321", now),
            Err(VerificationError::InvalidOtp)
        );
    }

    #[test]
    fn expired_code_is_rejected() {
        let now = Utc::now();
        let record = otp("123456", now - Duration::seconds(1));

        assert_eq!(
            check(&record, "123456", now),
            Err(VerificationError::Expired)
        );
    }

    #[test]
    fn mismatch_is_reported_before_expiry() {
        let now = Utc::now();
        let record = otp("123456", now - Duration::minutes(1));

        assert_eq!(
            check(&record, "000000", now),
            Err(VerificationError::InvalidOtp)
        );
    }
}
