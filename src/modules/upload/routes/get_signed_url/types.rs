pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    fn default_resource_type() -> String {
        "raw".to_string()
    }

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[serde(default)]
        #[validate(length(min = 1, message = "Public id is required"))]
        pub public_id: String,
        #[serde(default = "default_resource_type")]
        pub resource_type: String,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedUrl(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedUrl(url) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Signed url generated", "url": url })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        ResourceNotFound,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::ResourceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "File not found" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry, an unexpected error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
