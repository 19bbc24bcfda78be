use super::repository::{self, CreateUserPayload, User};
use crate::{
    modules::{
        auth::service::jwt::{self, Role},
        otp::service::OtpPurpose,
    },
    types::Context,
};
use std::{borrow::Cow, sync::Arc};
use validator::ValidationError;

#[derive(Debug, PartialEq)]
pub enum Error {
    AlreadyExists,
    UnexpectedError,
}

pub fn sign_token(ctx: &Context, user: &User) -> Result<String, Error> {
    jwt::sign(&ctx.jwt, user.id.clone(), Role::User, None).map_err(|_| Error::UnexpectedError)
}

/// Registers a user whose email and mobile number are both unused and signs
/// a token for them.
pub async fn create_user(
    ctx: Arc<Context>,
    payload: CreateUserPayload,
) -> Result<(User, String), Error> {
    if repository::find_by_email_or_mobile_number(
        &ctx.db_conn.pool,
        payload.email.clone(),
        payload.mobile_number.clone(),
    )
    .await
    .map_err(|_| Error::UnexpectedError)?
    .is_some()
    {
        tracing::warn!(
            "User creation rejected, {} or {} is taken",
            payload.email,
            payload.mobile_number
        );
        return Err(Error::AlreadyExists);
    }

    let user = repository::create(&ctx.db_conn.pool, payload)
        .await
        .map_err(|err| match err {
            repository::Error::DuplicateUser => Error::AlreadyExists,
            _ => Error::UnexpectedError,
        })?;

    tracing::info!("Created user {}", user.id);

    let token = sign_token(&ctx, &user)?;

    Ok((user, token))
}

/// Otp purposes a user may request, defaulting to login.
pub fn parse_otp_purpose(raw: &str) -> Option<OtpPurpose> {
    match raw.parse::<OtpPurpose>() {
        Ok(purpose @ (OtpPurpose::UserLogin | OtpPurpose::UserRegistration)) => Some(purpose),
        _ => None,
    }
}

pub fn validate_otp_type(raw: &str) -> Result<(), ValidationError> {
    match parse_otp_purpose(raw) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("INVALID_OTP_TYPE")
            .with_message(Cow::from("Type must be USER_LOGIN or USER_REGISTRATION"))),
    }
}

pub fn default_otp_type() -> String {
    OtpPurpose::UserLogin.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_purposes_are_accepted() {
        assert_eq!(parse_otp_purpose("USER_LOGIN"), Some(OtpPurpose::UserLogin));
        assert_eq!(
            parse_otp_purpose("USER_REGISTRATION"),
            Some(OtpPurpose::UserRegistration)
        );
        assert_eq!(parse_otp_purpose("vendor_login"), None);
        assert_eq!(parse_otp_purpose("user_login"), None);
    }

    #[test]
    fn missing_type_means_login() {
        assert_eq!(default_otp_type(), "USER_LOGIN");
        assert!(validate_otp_type(&default_otp_type()).is_ok());
        assert!(validate_otp_type("").is_err());
    }
}
