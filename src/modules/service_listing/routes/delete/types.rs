pub mod request {
    use crate::modules::auth::middleware::VendorAuth;

    pub struct Payload {
        pub id: String,
        pub auth: VendorAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ServiceDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Service deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ServiceNotFound,
        FailedToDeleteService,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Service not found" })),
                )
                    .into_response(),
                Self::FailedToDeleteService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
