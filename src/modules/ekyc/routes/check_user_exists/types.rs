pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    pub struct Payload {
        pub email: Option<String>,
        pub phone_number: Option<String>,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Exists { field: &'static str },
        DoesNotExist,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Exists { field } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "User exists",
                        "data": { "exists": true, "field": field }
                    })),
                )
                    .into_response(),
                Self::DoesNotExist => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "User does not exist",
                        "data": { "exists": false }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingCredentials,
        FailedToFetchVendor,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingCredentials => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Email or phone number is required" })),
                )
                    .into_response(),
                Self::FailedToFetchVendor => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to check user" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
