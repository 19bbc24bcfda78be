pub mod request {
    use crate::modules::auth::middleware::VendorAuth;

    pub struct Payload {
        pub id: String,
        pub auth: VendorAuth,
    }
}

pub mod response {
    use crate::modules::service_listing::repository::ServiceListing;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Service(ServiceListing),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Service(service) => {
                    (StatusCode::OK, Json(json!({ "data": service }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        ServiceNotFound,
        FailedToFetchService,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Service not found" })),
                )
                    .into_response(),
                Self::FailedToFetchService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
