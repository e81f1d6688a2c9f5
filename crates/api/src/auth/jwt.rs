//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. They
//! are minted by the external auth provider; this service only validates
//! them. [`generate_access_token`] exists for tests and local tooling.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use opphub_core::roles::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id at the auth provider.
    pub sub: String,
    /// The user's role. Unknown role names fail deserialization.
    pub role: Role,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Configuration for JWT token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth provider.
    pub secret: String,
    /// Clock skew tolerated when checking `exp`, in seconds.
    pub leeway_secs: u64,
}

/// Default clock-skew allowance in seconds.
const DEFAULT_LEEWAY_SECS: u64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_LEEWAY_SECS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let leeway_secs: u64 = std::env::var("JWT_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("JWT_LEEWAY_SECS must be a valid u64");

        Self {
            secret,
            leeway_secs,
        }
    }
}

/// Generate an HS256 access token for the given user, valid for
/// `expiry_mins` minutes.
pub fn generate_access_token(
    user_id: &str,
    role: Role,
    expiry_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + expiry_mins * 60;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
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
/// Checks the HS256 signature, and `exp` within the configured leeway.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = config.leeway_secs;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            leeway_secs: 60,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token("U1", Role::Seller, 15, &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "U1");
        assert_eq!(claims.role, Role::Seller);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well beyond the 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "U1".to_string(),
            role: Role::Buyer,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_leeway_tolerates_small_clock_skew() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "U1".to_string(),
            role: Role::Buyer,
            exp: now - 30,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let lenient = test_config();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(lenient.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &lenient).is_ok());

        let strict = JwtConfig {
            leeway_secs: 0,
            ..lenient
        };
        assert!(validate_token(&token, &strict).is_err());
    }

    #[test]
    fn test_unknown_role_claim_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": "U1",
            "role": "superuser",
            "exp": now + 600,
            "iat": now,
            "jti": "t-1",
        });

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(
            validate_token(&token, &config).is_err(),
            "a role outside the closed set must not authenticate"
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            leeway_secs: 60,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            leeway_secs: 60,
        };

        let token = generate_access_token("U1", Role::Admin, 15, &config_a)
            .expect("token generation should succeed");

        assert!(validate_token(&token, &config_b).is_err());
    }
}
