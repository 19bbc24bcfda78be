pub mod request {
    use crate::utils::validation::validate_phone_number;
    use chrono::NaiveDate;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(length(min = 1, message = "Full name is required"))]
        pub full_name: String,
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(custom(code = "INVALID_PHONE_NUMBER", function = "validate_phone_number"))]
        pub mobile_number: String,
        pub date_of_birth: Option<NaiveDate>,
    }
}

pub mod response {
    use crate::{modules::user::repository::User, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Onboarded { token: String, user: User },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Onboarded { token, user } => (
                    StatusCode::CREATED,
                    Json(json!({ "data": { "token": token, "user": user } })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        UserAlreadyExists,
        FailedToOnboardUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::UserAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "User with this email or mobile number already exists"
                    })),
                )
                    .into_response(),
                Self::FailedToOnboardUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to onboard user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
