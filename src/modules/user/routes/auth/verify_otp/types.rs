pub mod request {
    use crate::{
        modules::user::service::{default_otp_type, validate_otp_type},
        utils::validation::validate_phone_number,
    };
    use chrono::NaiveDate;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(custom(code = "INVALID_PHONE_NUMBER", function = "validate_phone_number"))]
        pub phone_number: String,
        #[validate(length(min = 1, message = "OTP is required"))]
        pub otp: String,
        #[serde(rename = "type", default = "default_otp_type")]
        #[validate(custom(code = "INVALID_OTP_TYPE", function = "validate_otp_type"))]
        pub otp_type: String,
        #[validate(length(min = 1, message = "Full name cannot be empty"))]
        pub full_name: Option<String>,
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: Option<String>,
        pub date_of_birth: Option<NaiveDate>,
    }
}

pub mod response {
    use crate::{
        modules::{otp::service::VerificationError, user::repository::User},
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        LoggedIn { token: String, user: User },
        Registered { token: String, user: User },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn { token, user } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Login successful",
                        "data": { "token": token, "user": user }
                    })),
                )
                    .into_response(),
                Self::Registered { token, user } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "User registered successfully",
                        "data": { "token": token, "user": user }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        Verification(VerificationError),
        RegistrationDetailsRequired,
        UserNotFound,
        UserAlreadyExists,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::Verification(VerificationError::UnexpectedError) | Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to verify OTP" })),
                )
                    .into_response(),
                Self::Verification(err) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.message() })),
                )
                    .into_response(),
                Self::RegistrationDetailsRequired => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Full name and email are required to register" })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "User not found" })),
                )
                    .into_response(),
                Self::UserAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "User with this email or mobile number already exists"
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
