mod check_status;
mod flutterwave_redirect;
mod initiate_payment;
mod payment_callback;
pub mod webhook;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(initiate_payment::get_router())
        .merge(payment_callback::get_router())
        .merge(flutterwave_redirect::get_router())
        .merge(check_status::get_router())
}
