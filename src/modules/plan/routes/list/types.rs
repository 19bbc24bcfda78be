pub mod response {
    use crate::modules::plan::repository::Plan;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Plans(Vec<Plan>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Plans(plans) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Plans fetched successfully", "data": plans })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchPlans,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchPlans => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch plans" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
