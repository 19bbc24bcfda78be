use super::types::{request, response};
use crate::{modules::service_listing::repository, types::Context};
use bigdecimal::{BigDecimal, FromPrimitive};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let average_price = payload
        .body
        .average_price
        .map(|price| BigDecimal::from_f64(price).ok_or(response::Error::InvalidPrice))
        .transpose()?;

    repository::update_by_id_and_vendor_id(
        &ctx.db_conn.pool,
        payload.id,
        payload.auth.vendor_id,
        repository::UpdateServiceListingPayload {
            title: payload.body.title,
            description: payload.body.description,
            average_price,
            category: payload.body.category,
            image_url: payload.body.image_url,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateService)?
    .ok_or(response::Error::ServiceNotFound)
    .map(response::Success::ServiceUpdated)
}
