pub mod request {
    use crate::modules::{auth::middleware::VendorAuth, transaction::repository::Gateway};
    use serde::Deserialize;
    use validator::Validate;

    fn default_gateway() -> Gateway {
        Gateway::AlatPay
    }

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[serde(default)]
        #[validate(length(min = 1, message = "Plan id is required"))]
        pub plan_id: String,
        #[serde(default = "default_gateway")]
        pub gateway: Gateway,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: VendorAuth,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;
    use validator::ValidationErrors;

    #[derive(Serialize)]
    pub struct InitiatedPayment {
        pub transaction_id: String,
        pub reference: String,
        pub gateway: String,
        pub payment_details: serde_json::Value,
        pub callback_endpoint: String,
    }

    pub enum Success {
        PaymentInitiated(InitiatedPayment),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaymentInitiated(payment) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Payment initiated",
                        "data": payment,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        VendorNotFound,
        PlanNotFound,
        FailedToInitiatePayment,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::VendorNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Vendor not found" })),
                )
                    .into_response(),
                Self::PlanNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Plan not found" })),
                )
                    .into_response(),
                Self::FailedToInitiatePayment => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Failed to initiate payment" })),
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
