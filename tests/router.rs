use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use ficago_backend_rs::{
    app::App,
    modules::auth::service::jwt::{self, Role},
};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use tower::ServiceExt;

mod common;

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

#[tokio::test]
async fn health_reports_healthy() {
    let app = common::router(common::context());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn serving_on_a_taken_port_fails() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = App::new(common::context_on(port as u32)).serve().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn vendor_routes_need_a_token() {
    let app = common::router(common::context());

    let response = app
        .oneshot(Request::get("/v1/api/vendor/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Token not provided" })
    );
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = common::router(common::context());

    let response = app
        .oneshot(
            Request::get("/v1/api/plans")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_cannot_buy_vendor_plans() {
    let ctx = common::context();
    let token = jwt::sign(&ctx.jwt, "01USER".to_string(), Role::User, None).unwrap();
    let app = common::router(ctx);

    let mut request = json_request(
        Method::POST,
        "/v1/api/vendor/plans/initiate-payment",
        json!({ "plan_id": "01PLAN" }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn vendors_cannot_edit_user_profiles() {
    let ctx = common::context();
    let token = jwt::sign(
        &ctx.jwt,
        "01VENDOR".to_string(),
        Role::Vendor,
        Some("FREE".to_string()),
    )
    .unwrap();
    let app = common::router(ctx);

    let mut request = json_request(
        Method::PUT,
        "/v1/api/user/profile",
        json!({ "full_name": "Ada Obi" }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn webhook_rejects_bad_signatures() {
    let app = common::router(common::context());

    let mut request = json_request(
        Method::POST,
        "/v1/api/webhook",
        json!({ "event": "charge.completed", "data": { "tx_ref": "plan-x", "status": "successful" } }),
    );
    request
        .headers_mut()
        .insert("verif-hash", "deadbeef".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid webhook signature" })
    );
}

#[tokio::test]
async fn webhook_acknowledges_signed_unrelated_events() {
    let app = common::router(common::context());

    let body = json!({ "event": "transfer.completed", "data": {} }).to_string();
    let mut mac = Hmac::<Sha256>::new_from_slice(common::WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    let response = app
        .oneshot(
            Request::post("/v1/api/webhook/failed")
                .header(header::CONTENT_TYPE, "application/json")
                .header("verif-hash", signature)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn check_user_exists_needs_an_email_or_phone_number() {
    let app = common::router(common::context());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/ekyc/check-user-exists",
            json!({ "email": " " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vendor_onboarding_reports_every_invalid_field() {
    let app = common::router(common::context());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/vendor/onboard",
            json!({ "email": "not-an-email", "mobile_number": "080-123", "skills": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("mobile_number"));
    assert!(errors.contains_key("skills"));
}

#[tokio::test]
async fn unknown_alatpay_transactions_cannot_be_confirmed() {
    let app = common::router(common::context());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/vendor/plans/payment-callback",
            json!({ "transaction_id": "never-issued" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signed_url_needs_a_public_id() {
    let app = common::router(common::context());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/api/upload-file/get-signed-url",
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
