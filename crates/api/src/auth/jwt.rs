//! Identity access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs issued by the platform's identity
//! service with a shared secret. This server only validates them; the
//! generator exists for local tooling and tests.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every identity access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's opaque id.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for identity token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15). Only used when
    /// issuing tokens locally.
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration. Tokens carrying an `aud` claim
/// (capability tokens do) are rejected.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: DEFAULT_ACCESS_EXPIRY_MINS,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_identifies_the_learner() {
        let config = config("identity-secret");
        let token = generate_access_token("U1", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "U1");
        assert_eq!(claims.exp - claims.iat, DEFAULT_ACCESS_EXPIRY_MINS * 60);
    }

    #[test]
    fn each_token_gets_its_own_jti() {
        let config = config("identity-secret");
        let a = validate_token(&generate_access_token("U1", &config).unwrap(), &config).unwrap();
        let b = validate_token(&generate_access_token("U1", &config).unwrap(), &config).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn token_past_expiry_and_leeway_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            sub: "U1".to_string(),
            exp: now - 120,
            iat: now - 1020,
            jti: Uuid::new_v4().to_string(),
        };

        assert!(validate_token(&sign(&stale, "identity-secret"), &config("identity-secret")).is_err());
    }

    #[test]
    fn token_from_another_issuer_is_rejected() {
        let foreign = generate_access_token("U1", &config("someone-elses-secret")).unwrap();
        assert!(validate_token(&foreign, &config("identity-secret")).is_err());
    }

    #[test]
    fn swapped_subject_breaks_the_signature() {
        let config = config("identity-secret");
        let learner = generate_access_token("U2", &config).unwrap();
        let subscriber = generate_access_token("U1", &config).unwrap();

        // U1's payload under U2's signature.
        let learner_parts: Vec<&str> = learner.split('.').collect();
        let subscriber_parts: Vec<&str> = subscriber.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            learner_parts[0], subscriber_parts[1], learner_parts[2]
        );

        assert!(validate_token(&forged, &config).is_err());
    }
}
