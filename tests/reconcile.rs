use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use ficago_backend_rs::{
    modules::{
        auth::service::jwt::{self, Role},
        otp::service::{self as otp, OtpPurpose, VerificationError},
        payment::service::{self as payment, alatpay, Verdict},
        plan::repository::{self as plans, CreatePlanPayload, Plan},
        subscription,
        transaction::repository::{
            self as transactions, CreateTransactionPayload, Gateway, Transaction,
            TransactionStatus, UpdateTransactionPayload, PLAN_SUBSCRIPTION_TYPE,
            SUBSCRIPTION_TRANSACTION_TYPE,
        },
        vendor::repository::{self as vendors, CreateVendorPayload, Vendor},
    },
    types::Context,
};
use futures::future::join_all;
use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use tower::ServiceExt;
use ulid::Ulid;

mod common;

async fn setup() -> Option<Arc<Context>> {
    let pool = common::database().await;
    if pool.is_none() {
        eprintln!("DATABASE_URL is not set, skipping");
    }
    pool.map(common::context_with_pool)
}

fn digits(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0..10).to_string()).collect()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn seed_plan(ctx: &Context) -> Plan {
    plans::create(
        &ctx.db_conn.pool,
        CreatePlanPayload {
            name: format!("Basic {}", Ulid::new()),
            price: BigDecimal::from(5000),
            currency: "NGN".to_string(),
            interval: "monthly".to_string(),
            features: vec!["Service listings".to_string()],
            is_popular: false,
            role: Role::Vendor,
            external_plan_id: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_vendor(ctx: &Context, email: String) -> Vendor {
    vendors::create(
        &ctx.db_conn.pool,
        CreateVendorPayload {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email,
            mobile_number: digits(11),
            business_type: "individual".to_string(),
            service_category: "cleaning".to_string(),
            skills: vec!["deep cleaning".to_string()],
        },
    )
    .await
    .unwrap()
}

fn unique_email() -> String {
    format!("{}@example.com", Ulid::new().to_string().to_lowercase())
}

async fn seed_transaction(
    ctx: &Context,
    vendor: &Vendor,
    plan: &Plan,
    gateway: Gateway,
) -> Transaction {
    transactions::create(
        &ctx.db_conn.pool,
        CreateTransactionPayload {
            user_id: vendor.id.clone(),
            plan_id: Some(plan.id.clone()),
            amount: plan.price.clone(),
            currency: plan.currency.clone(),
            kind: PLAN_SUBSCRIPTION_TYPE.to_string(),
            reference: transactions::plan_payment_reference(&plan.id, &vendor.id, Utc::now()),
            description: None,
            payment_type: None,
            transaction_type: Some(SUBSCRIPTION_TRANSACTION_TYPE.to_string()),
            gateway,
        },
    )
    .await
    .unwrap()
}

async fn subscriptions_for(ctx: &Context, transaction_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM vendor_subscriptions WHERE transaction_id = $1")
        .bind(transaction_id)
        .fetch_one(&ctx.db_conn.pool)
        .await
        .unwrap()
}

fn signed_webhook(body: String) -> Request<Body> {
    let mut mac = Hmac::<Sha256>::new_from_slice(common::WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Request::post("/v1/api/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .header("verif-hash", signature)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn duplicate_charge_completed_webhooks_activate_one_subscription() {
    let Some(ctx) = setup().await else { return };
    let plan = seed_plan(&ctx).await;
    let vendor = seed_vendor(&ctx, unique_email()).await;
    let transaction = seed_transaction(&ctx, &vendor, &plan, Gateway::Flutterwave).await;

    let body = json!({
        "event": "charge.completed",
        "data": {
            "tx_ref": transaction.reference,
            "status": "successful",
            "amount": 5000.0,
        }
    })
    .to_string();

    for _ in 0..2 {
        let response = common::router(ctx.clone())
            .oneshot(signed_webhook(body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    let settled = transactions::find_by_id(&ctx.db_conn.pool, transaction.id.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled.status, TransactionStatus::Successful);

    let activated =
        subscription::repository::find_by_transaction_id(&ctx.db_conn.pool, transaction.id.clone())
            .await
            .unwrap()
            .unwrap();
    assert_eq!(activated.vendor_id, vendor.id);
    assert_eq!(activated.plan_id, plan.id);
    assert_eq!(subscriptions_for(&ctx, &transaction.id).await, 1);

    let vendor = vendors::find_by_id(&ctx.db_conn.pool, vendor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vendor.current_plan_id, Some(plan.id));
}

#[tokio::test]
async fn repeated_alatpay_callbacks_settle_once() {
    let Some(ctx) = setup().await else { return };
    let plan = seed_plan(&ctx).await;
    let vendor = seed_vendor(&ctx, unique_email()).await;
    let transaction = seed_transaction(&ctx, &vendor, &plan, Gateway::AlatPay).await;

    let account = alatpay::generate_virtual_account(
        &ctx.payment.alatpay,
        alatpay::VirtualAccountRequest {
            amount: transaction.amount.clone(),
            currency: transaction.currency.clone(),
            order_id: transaction.reference.clone(),
            description: "Subscription to Basic plan".to_string(),
            customer: alatpay::Customer {
                email: vendor.email.clone(),
                phone: vendor.mobile_number.clone(),
                first_name: vendor.first_name.clone(),
                last_name: vendor.last_name.clone(),
            },
        },
    )
    .await
    .unwrap();

    transactions::update(
        &ctx.db_conn.pool,
        transaction.id.clone(),
        UpdateTransactionPayload {
            external_reference: Some(account.transaction_id.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    for _ in 0..2 {
        let response = common::router(ctx.clone())
            .oneshot(json_request(
                Method::POST,
                "/v1/api/vendor/plans/payment-callback",
                json!({ "transaction_id": account.transaction_id }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["status"], "SUCCESSFUL");
    }

    assert_eq!(subscriptions_for(&ctx, &transaction.id).await, 1);
    assert!(!ctx
        .payment
        .alatpay
        .ledger
        .lock()
        .await
        .contains_key(&account.transaction_id));
}

#[tokio::test]
async fn concurrent_reconciles_activate_one_subscription() {
    let Some(ctx) = setup().await else { return };
    let plan = seed_plan(&ctx).await;
    let vendor = seed_vendor(&ctx, unique_email()).await;
    let transaction = seed_transaction(&ctx, &vendor, &plan, Gateway::Flutterwave).await;

    let results = join_all((0..10).map(|_| {
        payment::reconcile(
            ctx.clone(),
            transaction.id.clone(),
            Verdict {
                status: TransactionStatus::Successful,
                amount: Some(BigDecimal::from(5000)),
                is_validated: true,
                payload: json!({ "status": "successful" }),
            },
        )
    }))
    .await;

    for result in results {
        assert_eq!(result.unwrap().status, TransactionStatus::Successful);
    }

    assert_eq!(subscriptions_for(&ctx, &transaction.id).await, 1);
}

#[tokio::test]
async fn short_payments_are_recorded_as_failed() {
    let Some(ctx) = setup().await else { return };
    let plan = seed_plan(&ctx).await;
    let vendor = seed_vendor(&ctx, unique_email()).await;
    let transaction = seed_transaction(&ctx, &vendor, &plan, Gateway::Flutterwave).await;

    let settled = payment::reconcile(
        ctx.clone(),
        transaction.id.clone(),
        Verdict {
            status: TransactionStatus::Successful,
            amount: Some(BigDecimal::from(1000)),
            is_validated: true,
            payload: json!({ "status": "successful" }),
        },
    )
    .await
    .unwrap();

    assert_eq!(settled.status, TransactionStatus::Failed);
    assert_eq!(subscriptions_for(&ctx, &transaction.id).await, 0);

    let vendor = vendors::find_by_id(&ctx.db_conn.pool, vendor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vendor.current_plan_id, None);
}

#[tokio::test]
async fn an_otp_verifies_only_once_under_concurrency() {
    let Some(ctx) = setup().await else { return };
    let phone_number = digits(11);
    let otp_type = OtpPurpose::UserLogin.to_string();

    let issued = otp::issue(ctx.clone(), phone_number.clone(), otp_type.clone())
        .await
        .unwrap();

    let results = join_all((0..20).map(|_| {
        otp::verify(
            ctx.clone(),
            phone_number.clone(),
            otp_type.clone(),
            issued.otp.clone(),
        )
    }))
    .await;

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(|err| *err == VerificationError::InvalidOtpOrPhoneNumber));
}

#[tokio::test]
async fn refused_payments_are_marked_failed() {
    let Some(ctx) = setup().await else { return };
    let plan = seed_plan(&ctx).await;
    let vendor = seed_vendor(&ctx, unique_email()).await;
    let token = jwt::sign(&ctx.jwt, vendor.id.clone(), Role::Vendor, None).unwrap();

    let mut request = json_request(
        Method::POST,
        "/v1/api/vendor/plans/initiate-payment",
        json!({ "plan_id": plan.id, "gateway": "FLUTTERWAVE" }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );

    let response = common::router(ctx.clone()).oneshot(request).await.unwrap();
    assert!(!response.status().is_success());

    let statuses: Vec<String> =
        sqlx::query_scalar("SELECT status FROM transactions WHERE user_id = $1")
            .bind(&vendor.id)
            .fetch_all(&ctx.db_conn.pool)
            .await
            .unwrap();
    assert_eq!(statuses, vec!["FAILED".to_string()]);
}

#[tokio::test]
async fn check_user_exists_ignores_email_case_and_padding() {
    let Some(ctx) = setup().await else { return };
    let email = unique_email();
    seed_vendor(&ctx, email.clone()).await;

    let response = common::router(ctx.clone())
        .oneshot(json_request(
            Method::POST,
            "/v1/api/ekyc/check-user-exists",
            json!({ "email": format!("  {}  ", email.to_uppercase()) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!({ "exists": true, "field": "email" })
    );
}
