use super::service::jwt::{self, Claims, Role};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    TokenNotProvided,
    InvalidToken,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::TokenNotProvided => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Token not provided"})),
            )
                .into_response(),
            Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid or expired token"})),
            )
                .into_response(),
        }
    }
}

fn get_token_from_header(header: &str) -> Result<&str, Error> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(Error::InvalidToken)
}

async fn get_claims_from_request(parts: &mut Parts) -> Result<Claims, Response> {
    let Extension(ctx) = parts
        .extract::<Extension<Arc<Context>>>()
        .await
        .map_err(|err| {
            tracing::error!("Context missing from request extensions: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })?;

    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(Error::TokenNotProvided.into_response())?;

    let token = get_token_from_header(auth_header).map_err(IntoResponse::into_response)?;

    jwt::verify(&ctx.jwt, token).map_err(|_| Error::InvalidToken.into_response())
}

#[derive(Serialize, Clone, Debug)]
pub struct Auth {
    pub claims: Claims,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        get_claims_from_request(parts)
            .await
            .map(|claims| Self { claims })
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct VendorAuth {
    pub vendor_id: String,
    pub claims: Claims,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for VendorAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let claims = get_claims_from_request(parts).await?;

        if claims.role != Role::Vendor {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Only vendors can access this resource" })),
            )
                .into_response());
        }

        Ok(Self {
            vendor_id: claims.id.clone(),
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(get_token_from_header("Bearer abc.def").ok(), Some("abc.def"));
        assert!(get_token_from_header("abc.def").is_err());
        assert!(get_token_from_header("Bearer ").is_err());
    }
}
