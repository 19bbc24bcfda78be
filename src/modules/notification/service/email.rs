use super::{types, Error, Notification, Result};
use crate::types::Context;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

struct SendEmailPayload {
    recipient: types::Recipient,
    subject: String,
    body: String,
}

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    match notification {
        Notification::VendorOnboarded(n) => send_vendor_onboarded_email(ctx, n).await,
        Notification::SubscriptionActivated(n) => send_subscription_activated_email(ctx, n).await,
        Notification::OtpRequested(_) => Err(Error::InvalidNotification),
    }
}

async fn send_email(ctx: Arc<Context>, payload: SendEmailPayload) -> Result<()> {
    let mail = ctx.mail.clone().ok_or(Error::NotConfigured)?;

    let from = mail.sender.parse().map_err(|err| {
        tracing::error!("Invalid sender address {}: {}", mail.sender, err);
        Error::NotSent
    })?;
    let to = format!("{} <{}>", payload.recipient.name, payload.recipient.email)
        .parse()
        .map_err(|err| {
            tracing::error!("Invalid recipient {}: {}", payload.recipient.email, err);
            Error::NotSent
        })?;

    let email = Message::builder()
        .from(from)
        .to(to)
        .subject(payload.subject)
        .header(ContentType::TEXT_HTML)
        .body(payload.body)
        .map_err(|err| {
            tracing::error!("Failed to build email: {}", err);
            Error::NotSent
        })?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.host)
        .map_err(|err| {
            tracing::error!("Failed to create mail transport for {}: {}", mail.host, err);
            Error::NotSent
        })?
        .credentials(Credentials::new(mail.user.clone(), mail.password.clone()))
        .build();

    transport.send(email).await.map(|_| ()).map_err(|err| {
        tracing::error!("Failed to send email: {}", err);
        Error::NotSent
    })
}

async fn send_vendor_onboarded_email(
    ctx: Arc<Context>,
    notification: types::VendorOnboarded,
) -> Result<()> {
    send_email(
        ctx,
        SendEmailPayload {
            subject: String::from("Welcome to FicaGo"),
            body: format!(
                "Hello {}, your vendor account has been created. Complete your profile to start receiving customers.",
                notification.recipient.name
            ),
            recipient: notification.recipient,
        },
    )
    .await
}

async fn send_subscription_activated_email(
    ctx: Arc<Context>,
    notification: types::SubscriptionActivated,
) -> Result<()> {
    send_email(
        ctx,
        SendEmailPayload {
            subject: format!("Your {} plan is active", notification.plan_name),
            body: format!(
                "Hello {}, your {} subscription is active until {}.",
                notification.recipient.name,
                notification.plan_name,
                notification.expires_at.format("%d %B %Y"),
            ),
            recipient: notification.recipient,
        },
    )
    .await
}
