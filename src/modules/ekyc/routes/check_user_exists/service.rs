use super::types::{request, response};
use crate::{modules::vendor, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let email = payload
        .email
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty());
    let phone_number = payload
        .phone_number
        .map(|phone_number| phone_number.trim().to_string())
        .filter(|phone_number| !phone_number.is_empty());

    if email.is_none() && phone_number.is_none() {
        return Err(response::Error::MissingCredentials);
    }

    let vendor = vendor::repository::find_by_email_or_mobile_number(
        &ctx.db_conn.pool,
        email.clone(),
        phone_number,
    )
    .await
    .map_err(|_| response::Error::FailedToFetchVendor)?;

    Ok(match vendor {
        Some(vendor) if Some(&vendor.email) == email.as_ref() => {
            response::Success::Exists { field: "email" }
        }
        Some(_) => response::Success::Exists {
            field: "phone_number",
        },
        None => response::Success::DoesNotExist,
    })
}
