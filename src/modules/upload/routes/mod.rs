mod file;
mod files;
mod get_signed_url;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(file::get_router())
        .merge(files::get_router())
        .merge(get_signed_url::get_router())
}
