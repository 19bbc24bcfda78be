use super::{types, Error, Notification, Result};
use crate::types::Context;
use reqwest::{Client, StatusCode};
use std::sync::Arc;

pub fn to_international_format(phone_number: &str) -> String {
    format!("+{}", phone_number.trim_start_matches('+'))
}

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    match notification {
        Notification::OtpRequested(n) => send_otp(ctx, n).await,
        _ => Err(Error::InvalidNotification),
    }
}

async fn send_otp(ctx: Arc<Context>, notification: types::OtpRequested) -> Result<()> {
    let sms = ctx.sms.clone().ok_or(Error::NotConfigured)?;

    let params = [
        ("To", to_international_format(&notification.phone_number)),
        ("From", sms.from_number.clone()),
        (
            "Body",
            format!(
                "Your FicaGo verification code is {}. It expires in 10 minutes.",
                notification.otp
            ),
        ),
    ];

    let res = Client::new()
        .post(format!(
            "{}/Accounts/{}/Messages.json",
            sms.api_endpoint, sms.account_sid
        ))
        .basic_auth(sms.account_sid.clone(), Some(sms.auth_token.clone()))
        .form(&params)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send sms: {}", err);
            Error::NotSent
        })?;

    match res.status() {
        StatusCode::OK | StatusCode::CREATED => Ok(()),
        status => {
            let data = res.text().await.unwrap_or_default();
            tracing::error!("Sms provider responded with {}: {}", status, data);
            Err(Error::NotSent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_get_a_single_plus_prefix() {
        assert_eq!(to_international_format("2348012345678"), "+2348012345678");
        assert_eq!(to_international_format("+2348012345678"), "+2348012345678");
    }
}
