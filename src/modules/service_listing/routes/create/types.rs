pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(length(min = 1, message = "Title is required"))]
        pub title: String,
        #[validate(length(min = 1, message = "Description is required"))]
        pub description: String,
        #[validate(
            required(message = "Average price is required"),
            range(min = 0.0, message = "Average price cannot be negative")
        )]
        pub average_price: Option<f64>,
        #[validate(length(min = 1, message = "Category is required"))]
        pub category: String,
        #[validate(url(message = "Image url must be a valid url"))]
        pub image_url: String,
    }
}

pub mod response {
    use crate::{modules::service_listing::repository::ServiceListing, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ServiceCreated(ServiceListing),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceCreated(service) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Service created", "data": service })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidPrice,
        FailedToCreateService,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::InvalidPrice => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid average price" })),
                )
                    .into_response(),
                Self::FailedToCreateService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
