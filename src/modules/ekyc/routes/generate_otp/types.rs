pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(length(min = 1, message = "Phone number is required"))]
        pub phone_number: String,
        #[serde(rename = "type")]
        #[validate(length(min = 1, message = "Type is required"))]
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
        OtpGenerated {
            phone_number: String,
            otp_type: String,
            expires_at: DateTime<Utc>,
            otp: Option<String>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpGenerated {
                    phone_number,
                    otp_type,
                    expires_at,
                    otp,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "OTP generated successfully",
                        "data": {
                            "phone_number": phone_number,
                            "type": otp_type,
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
        FailedToGenerateOtp,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
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
