pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(length(min = 1, message = "Transaction id is required"))]
        pub transaction_id: String,
    }
}

pub mod response {
    use crate::{modules::transaction::repository::Transaction, utils::validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        PaymentReconciled {
            is_validated: bool,
            transaction: Transaction,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentReconciled {
                    is_validated,
                    transaction,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Payment callback processed",
                        "data": {
                            "status": transaction.status,
                            "is_validated": is_validated,
                            "transaction": transaction,
                        }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToConfirmPayment,
        TransactionNotFound,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::FailedToConfirmPayment => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Failed to confirm payment" })),
                )
                    .into_response(),
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
