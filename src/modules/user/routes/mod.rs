mod auth;
mod onboard;
mod profile;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(onboard::get_router())
        .nest("/auth", auth::get_router())
        .merge(profile::get_router())
}
