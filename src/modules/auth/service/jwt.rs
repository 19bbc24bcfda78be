use crate::types::JwtContext;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

crate::text_enum!(Role {
    User => "USER",
    Vendor => "VENDOR",
});

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Claims {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    SigningFailed,
    InvalidToken,
}

type Result<T> = std::result::Result<T, Error>;

pub fn sign(cfg: &JwtContext, id: String, role: Role, plan_id: Option<String>) -> Result<String> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        id,
        role,
        plan_id,
        iat,
        exp: iat + cfg.expires_in,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret_key.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign token for {}: {}", claims.id, err);
        Error::SigningFailed
    })
}

pub fn verify(cfg: &JwtContext, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret_key.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|err| {
        tracing::warn!("Rejected token: {}", err);
        Error::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(expires_in: i64) -> JwtContext {
        JwtContext {
            secret_key: "test-secret".to_string(),
            expires_in,
        }
    }

    #[test]
    fn signed_tokens_verify_with_the_same_secret() {
        let token = sign(
            &cfg(3600),
            "01HZVENDOR".to_string(),
            Role::Vendor,
            Some("FREE".to_string()),
        )
        .unwrap();

        let claims = verify(&cfg(3600), &token).unwrap();
        assert_eq!(claims.id, "01HZVENDOR");
        assert_eq!(claims.role, Role::Vendor);
        assert_eq!(claims.plan_id.as_deref(), Some("FREE"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = sign(&cfg(3600), "01HZUSER".to_string(), Role::User, None).unwrap();
        let other = JwtContext {
            secret_key: "another-secret".to_string(),
            expires_in: 3600,
        };

        assert_eq!(verify(&other, &token), Err(Error::InvalidToken));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = sign(&cfg(-3600), "01HZUSER".to_string(), Role::User, None).unwrap();

        assert_eq!(verify(&cfg(3600), &token), Err(Error::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(verify(&cfg(3600), "not-a-token"), Err(Error::InvalidToken));
    }
}
