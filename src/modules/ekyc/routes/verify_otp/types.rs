pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(length(min = 1, message = "Phone number is required"))]
        pub phone_number: String,
        #[validate(length(min = 1, message = "OTP is required"))]
        pub otp: String,
        #[serde(rename = "type")]
        #[validate(length(min = 1, message = "Type is required"))]
        pub otp_type: String,
    }
}

pub mod response {
    use crate::{modules::otp::service::VerificationError, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OtpVerified,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpVerified => (
                    StatusCode::OK,
                    Json(json!({ "message": "OTP verified successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        Verification(VerificationError),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::Verification(VerificationError::UnexpectedError) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": VerificationError::UnexpectedError.message() })),
                )
                    .into_response(),
                Self::Verification(err) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.message() })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
