pub mod request {
    use serde::Deserialize;

    /// Query string Flutterwave appends when it redirects the customer back.
    #[derive(Deserialize, Default)]
    #[serde(default)]
    pub struct Payload {
        pub tx_ref: String,
        pub status: Option<String>,
        pub transaction_id: Option<String>,
    }
}

pub mod response {
    use crate::modules::transaction::repository::Transaction;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PaymentReconciled(Transaction),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentReconciled(transaction) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Payment callback processed",
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
        MissingReference,
        TransactionNotFound,
        FailedToVerifyPayment,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingReference => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "tx_ref is required" })),
                )
                    .into_response(),
                Self::TransactionNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Transaction not found" })),
                )
                    .into_response(),
                Self::FailedToVerifyPayment => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Failed to verify payment" })),
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
