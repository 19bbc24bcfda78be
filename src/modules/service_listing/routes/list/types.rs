pub mod response {
    use crate::modules::service_listing::repository::ServiceListing;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Services(Vec<ServiceListing>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Services(services) => {
                    (StatusCode::OK, Json(json!({ "data": services }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchServices,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchServices => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch services" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
