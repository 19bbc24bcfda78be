pub mod email;
pub mod sms;

use crate::{
    modules::{plan::repository::Plan, vendor::repository::Vendor},
    types::Context,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub enum Backend {
    Email,
    Sms,
}

pub mod types {
    use chrono::{DateTime, Utc};

    #[derive(Clone, Debug)]
    pub struct Recipient {
        pub name: String,
        pub email: String,
    }

    #[derive(Clone, Debug)]
    pub struct OtpRequested {
        pub phone_number: String,
        pub otp: String,
    }

    #[derive(Clone, Debug)]
    pub struct VendorOnboarded {
        pub recipient: Recipient,
    }

    #[derive(Clone, Debug)]
    pub struct SubscriptionActivated {
        pub recipient: Recipient,
        pub plan_name: String,
        pub expires_at: DateTime<Utc>,
    }
}

#[derive(Clone, Debug)]
pub enum Notification {
    OtpRequested(types::OtpRequested),
    VendorOnboarded(types::VendorOnboarded),
    SubscriptionActivated(types::SubscriptionActivated),
}

fn recipient(vendor: &Vendor) -> types::Recipient {
    types::Recipient {
        name: format!("{} {}", vendor.first_name, vendor.last_name),
        email: vendor.email.clone(),
    }
}

impl Notification {
    pub fn otp_requested(phone_number: String, otp: String) -> Self {
        Notification::OtpRequested(types::OtpRequested { phone_number, otp })
    }

    pub fn vendor_onboarded(vendor: &Vendor) -> Self {
        Notification::VendorOnboarded(types::VendorOnboarded {
            recipient: recipient(vendor),
        })
    }

    pub fn subscription_activated(vendor: &Vendor, plan: &Plan, expires_at: DateTime<Utc>) -> Self {
        Notification::SubscriptionActivated(types::SubscriptionActivated {
            recipient: recipient(vendor),
            plan_name: plan.name.clone(),
            expires_at,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NotConfigured,
    NotSent,
    InvalidNotification,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification, backend: Backend) -> Result<()> {
    let result = match backend {
        Backend::Email => email::send(ctx, notification).await,
        Backend::Sms => sms::send(ctx, notification).await,
    };

    if let Err(ref err) = result {
        tracing::warn!("Notification was not delivered: {:?}", err);
    }

    result
}
