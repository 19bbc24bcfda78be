mod check_user_exists;
mod generate_otp;
mod verify_otp;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(generate_otp::get_router())
        .merge(verify_otp::get_router())
        .merge(check_user_exists::get_router())
}
