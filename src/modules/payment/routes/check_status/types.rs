pub mod request {
    use crate::modules::auth::middleware::VendorAuth;

    pub struct Payload {
        pub transaction_id: String,
        pub auth: VendorAuth,
    }
}

pub mod response {
    use crate::modules::transaction::repository::Transaction;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Status(Transaction),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Status(transaction) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Transaction status retrieved",
                        "data": {
                            "status": transaction.status,
                            "transaction": transaction,
                        }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        TransactionNotFound,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TransactionNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Transaction not found" })),
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
