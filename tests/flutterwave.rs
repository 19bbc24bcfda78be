use bigdecimal::BigDecimal;
use ficago_backend_rs::modules::payment::service::flutterwave::{
    self, CreatePaymentPlanPayload, Customer, Error, InitializePaymentPayload,
};
use serde_json::json;
use wiremock::{
    matchers::{bearer_token, body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

mod common;

fn payment(reference: &str) -> InitializePaymentPayload {
    InitializePaymentPayload {
        reference: reference.to_string(),
        amount: BigDecimal::from(2500),
        currency: "NGN".to_string(),
        customer: Customer {
            email: "ada@example.com".to_string(),
            name: "Ada Obi".to_string(),
            phone_number: "08012345678".to_string(),
        },
        title: "FicaGo Subscription".to_string(),
        description: "Subscription to Premium plan".to_string(),
        meta: json!({ "plan_id": "01PLAN" }),
    }
}

#[tokio::test]
async fn initialize_payment_returns_the_checkout_link() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(bearer_token("FLWSECK_TEST"))
        .and(body_partial_json(json!({
            "tx_ref": "plan-01PLAN-01VENDOR-1",
            "currency": "NGN",
            "customer": { "phonenumber": "08012345678" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Hosted Link",
            "data": { "link": "https://checkout.flutterwave.com/v3/hosted/pay/abc" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = common::flutterwave(server.uri());
    let link = flutterwave::initialize_payment(&cfg, payment("plan-01PLAN-01VENDOR-1"))
        .await
        .unwrap();

    assert_eq!(link.link, "https://checkout.flutterwave.com/v3/hosted/pay/abc");
}

#[tokio::test]
async fn initialize_payment_surfaces_gateway_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Invalid currency",
            "data": null
        })))
        .mount(&server)
        .await;

    let cfg = common::flutterwave(server.uri());
    let err = flutterwave::initialize_payment(&cfg, payment("plan-x"))
        .await
        .unwrap_err();

    assert_eq!(err, Error::InvalidHttpResponseStatusCode);
}

#[tokio::test]
async fn rejected_envelopes_are_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/verify_by_reference"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "No transaction was found for this id",
            "data": null
        })))
        .mount(&server)
        .await;

    let cfg = common::flutterwave(server.uri());
    let err = flutterwave::verify_by_reference(&cfg, "plan-missing")
        .await
        .unwrap_err();

    assert_eq!(err, Error::Rejected);
}

#[tokio::test]
async fn verify_by_reference_reads_the_charge() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/verify_by_reference"))
        .and(query_param("tx_ref", "plan-01PLAN-01VENDOR-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Transaction fetched successfully",
            "data": {
                "id": 4975363,
                "tx_ref": "plan-01PLAN-01VENDOR-1",
                "flw_ref": "FLW-MOCK-1",
                "amount": 2500,
                "charged_amount": 2535,
                "currency": "NGN",
                "status": "successful"
            }
        })))
        .mount(&server)
        .await;

    let cfg = common::flutterwave(server.uri());
    let verified = flutterwave::verify_by_reference(&cfg, "plan-01PLAN-01VENDOR-1")
        .await
        .unwrap();

    assert_eq!(verified.id, "4975363");
    assert_eq!(verified.status, "successful");
    assert_eq!(verified.amount, BigDecimal::from(2500));
}

#[tokio::test]
async fn create_plan_returns_the_external_plan() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payment-plans"))
        .and(body_partial_json(json!({ "name": "Basic", "interval": "monthly" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Payment plan created",
            "data": {
                "id": 58291,
                "name": "Basic",
                "amount": 1500,
                "interval": "monthly",
                "status": "active"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = common::flutterwave(server.uri());
    let plan = flutterwave::create_plan(
        &cfg,
        CreatePaymentPlanPayload {
            amount: BigDecimal::from(1500),
            name: "Basic".to_string(),
            interval: "monthly".to_string(),
            duration: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(plan.id, "58291");
    assert_eq!(plan.interval, "monthly");
}

#[tokio::test]
async fn unreachable_gateway_is_reported() {
    let cfg = common::flutterwave("http://127.0.0.1:9".to_string());

    let err = flutterwave::verify_by_reference(&cfg, "plan-x")
        .await
        .unwrap_err();

    assert_eq!(err, Error::RequestNotSent);
}
