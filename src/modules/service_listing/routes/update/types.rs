pub mod request {
    use crate::modules::auth::middleware::VendorAuth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Body {
        #[validate(length(min = 1, message = "Title cannot be empty"))]
        pub title: Option<String>,
        #[validate(length(min = 1, message = "Description cannot be empty"))]
        pub description: Option<String>,
        #[validate(range(min = 0.0, message = "Average price cannot be negative"))]
        pub average_price: Option<f64>,
        #[validate(length(min = 1, message = "Category cannot be empty"))]
        pub category: Option<String>,
        #[validate(url(message = "Image url must be a valid url"))]
        pub image_url: Option<String>,
        pub is_active: Option<bool>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: VendorAuth,
    }
}

pub mod response {
    use crate::{modules::service_listing::repository::ServiceListing, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ServiceUpdated(ServiceListing),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceUpdated(service) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Service updated", "data": service })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidPrice,
        ServiceNotFound,
        FailedToUpdateService,
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
                Self::ServiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Service not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
