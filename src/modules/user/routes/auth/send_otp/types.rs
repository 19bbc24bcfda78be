pub mod request {
    use crate::{
        modules::user::service::{default_otp_type, validate_otp_type},
        utils::validation::validate_phone_number,
    };
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(custom(code = "INVALID_PHONE_NUMBER", function = "validate_phone_number"))]
        pub phone_number: String,
        #[serde(rename = "type", default = "default_otp_type")]
        #[validate(custom(code = "INVALID_OTP_TYPE", function = "validate_otp_type"))]
        pub otp_type: String,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OtpSent {
            phone_number: String,
            expires_at: DateTime<Utc>,
            otp: Option<String>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpSent {
                    phone_number,
                    expires_at,
                    otp,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "OTP generated successfully",
                        "data": {
                            "phone_number": phone_number,
                            "expires_at": expires_at,
                            "otp": otp,
                        }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        UserNotFound,
        UserAlreadyExists,
        FailedToGenerateOtp,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "User not found with this phone number" })),
                )
                    .into_response(),
                Self::UserAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "User with this phone number already exists" })),
                )
                    .into_response(),
                Self::FailedToGenerateOtp => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to generate OTP" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
