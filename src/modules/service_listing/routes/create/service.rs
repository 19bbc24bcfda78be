use super::types::{request, response};
use crate::{
    modules::{auth::middleware::VendorAuth, service_listing::repository},
    types::Context,
};
use bigdecimal::{BigDecimal, FromPrimitive};
use std::sync::Arc;
use validator::Validate;

pub async fn service(
    ctx: Arc<Context>,
    auth: VendorAuth,
    payload: request::Payload,
) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let average_price = payload
        .average_price
        .and_then(BigDecimal::from_f64)
        .ok_or(response::Error::InvalidPrice)?;

    let service = repository::create(
        &ctx.db_conn.pool,
        repository::CreateServiceListingPayload {
            vendor_id: auth.vendor_id,
            title: payload.title,
            description: payload.description,
            average_price,
            category: payload.category,
            image_url: payload.image_url,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateService)?;

    tracing::info!("Vendor {} created service {}", service.vendor_id, service.id);

    Ok(response::Success::ServiceCreated(service))
}
