use crate::types::FlutterwaveContext;
use bigdecimal::{BigDecimal, ToPrimitive};
use hmac::{Hmac, Mac};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;
use sha2::Sha256;

#[derive(Debug, PartialEq)]
pub enum Error {
    RequestNotSent,
    InvalidHttpResponseStatusCode,
    FailedToDecodeResponse,
    Rejected,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

struct SendRequestPayload<'a> {
    route: String,
    method: Method,
    body: Option<serde_json::Value>,
    query: Option<&'a [(&'a str, &'a str)]>,
    expected_status_code: StatusCode,
}

async fn send_request<'a, R: DeserializeOwned>(
    cfg: &FlutterwaveContext,
    payload: SendRequestPayload<'a>,
) -> Result<R, Error> {
    let url = format!("{}{}", cfg.api_endpoint, payload.route);
    let mut req = reqwest::Client::new()
        .request(payload.method, url)
        .bearer_auth(&cfg.secret_key);

    if let Some(query) = payload.query {
        req = req.query(query);
    }

    if let Some(body) = payload.body {
        req = req.json(&body);
    }

    let res = req.send().await.map_err(|err| {
        tracing::error!("Failed to send request to {}: {}", payload.route, err);
        Error::RequestNotSent
    })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to read response of {}: {}", payload.route, err);
        Error::FailedToDecodeResponse
    })?;

    if status != payload.expected_status_code {
        tracing::error!(
            "Unexpected {} from {}, expected {}: {}",
            status,
            payload.route,
            payload.expected_status_code,
            data
        );
        return Err(Error::InvalidHttpResponseStatusCode);
    }

    tracing::debug!("Response received from flutterwave server: {}", data);

    let envelope = serde_json::de::from_str::<Envelope<R>>(data.as_str()).map_err(|err| {
        tracing::error!("Failed to decode response of {}: {}", payload.route, err);
        Error::FailedToDecodeResponse
    })?;

    match (envelope.status.as_str(), envelope.data) {
        ("success", Some(data)) => Ok(data),
        _ => {
            tracing::error!(
                "Flutterwave rejected {}: {}",
                payload.route,
                envelope.message
            );
            Err(Error::Rejected)
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Customer {
    pub email: String,
    pub name: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
}

pub struct InitializePaymentPayload {
    pub reference: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub customer: Customer,
    pub title: String,
    pub description: String,
    pub meta: serde_json::Value,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PaymentLink {
    pub link: String,
}

pub async fn initialize_payment(
    cfg: &FlutterwaveContext,
    payload: InitializePaymentPayload,
) -> Result<PaymentLink, Error> {
    send_request(
        cfg,
        SendRequestPayload {
            route: "/payments".to_string(),
            method: Method::POST,
            body: Some(serde_json::json!({
                "tx_ref": payload.reference,
                "amount": payload.amount.to_f64(),
                "currency": payload.currency,
                "redirect_url": cfg.redirect_url,
                "payment_options": "card,banktransfer,ussd",
                "customer": payload.customer,
                "customizations": {
                    "title": payload.title,
                    "description": payload.description,
                },
                "meta": payload.meta,
            })),
            query: None,
            expected_status_code: StatusCode::OK,
        },
    )
    .await
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct VerifiedTransaction {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub tx_ref: String,
    #[serde(default)]
    pub flw_ref: Option<String>,
    pub amount: BigDecimal,
    #[serde(default)]
    pub charged_amount: Option<BigDecimal>,
    pub currency: String,
    pub status: String,
}

pub async fn verify_by_reference(
    cfg: &FlutterwaveContext,
    reference: &str,
) -> Result<VerifiedTransaction, Error> {
    send_request(
        cfg,
        SendRequestPayload {
            route: "/transactions/verify_by_reference".to_string(),
            method: Method::GET,
            body: None,
            query: Some(&[("tx_ref", reference)]),
            expected_status_code: StatusCode::OK,
        },
    )
    .await
}

pub struct CreatePaymentPlanPayload {
    pub amount: BigDecimal,
    pub name: String,
    pub interval: String,
    pub duration: Option<u32>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PaymentPlan {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub name: String,
    pub interval: String,
}

pub async fn create_plan(
    cfg: &FlutterwaveContext,
    payload: CreatePaymentPlanPayload,
) -> Result<PaymentPlan, Error> {
    send_request(
        cfg,
        SendRequestPayload {
            route: "/payment-plans".to_string(),
            method: Method::POST,
            body: Some(serde_json::json!({
                "amount": payload.amount.to_f64(),
                "name": payload.name,
                "interval": payload.interval,
                "duration": payload.duration,
            })),
            query: None,
            expected_status_code: StatusCode::OK,
        },
    )
    .await
}

/// Checks the `verif-hash` header: the hex HMAC-SHA256 of the raw body keyed
/// with the webhook secret.
pub fn verify_signature(webhook_secret: &str, body: &[u8], signature: &str) -> bool {
    let signature = match hex::decode(signature.trim()) {
        Ok(signature) => signature,
        Err(_) => return false,
    };

    let mut mac = match Hmac::<Sha256>::new_from_slice(webhook_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(err) => {
            tracing::error!("Failed to generate mac: {:?}", err);
            return false;
        }
    };

    mac.update(body);
    mac.verify_slice(signature.as_ref()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_the_body_signature() {
        let body = br#"{"event":"charge.completed"}"#;

        assert!(verify_signature("whsec", body, &sign("whsec", body)));
    }

    #[test]
    fn rejects_tampered_bodies_and_foreign_secrets() {
        let body = br#"{"event":"charge.completed"}"#;
        let signature = sign("whsec", body);

        assert!(!verify_signature("whsec", br#"{"event":"charge.failed"}"#, &signature));
        assert!(!verify_signature("other", body, &signature));
    }

    #[test]
    fn rejects_malformed_signatures() {
        assert!(!verify_signature("whsec", b"{}", "not-hex"));
        assert!(!verify_signature("whsec", b"{}", ""));
    }

    #[test]
    fn numeric_ids_decode_as_strings() {
        let plan = serde_json::from_str::<PaymentPlan>(
            r#"{"id": 58291, "name": "Basic", "interval": "monthly", "amount": 1500}"#,
        )
        .unwrap();

        assert_eq!(plan.id, "58291");
    }
}
