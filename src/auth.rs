use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::graphql::types::ID;

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
}

/// Claims embedded in the bearer token handed out at signup.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The user's ID in its string form.
    sub: String,
    iat: i64,
    exp: i64,
}

const TOKEN_TTL_HOURS: i64 = 24;

/// Signs and verifies the bearer tokens asserting a caller's identity.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> JwtService {
        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn create_token(&self, user_id: &ID) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: String::from(user_id),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verifies the signature and expiry, then returns the embedded user id.
    pub fn verify_token(&self, token: &str) -> Result<ID> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        data.claims.sub.parse()
    }
}

#[cfg(test)]
mod tests {
    use crate::graphql::model::user::USER_TYPE_NAME;

    use super::*;

    #[test]
    fn token_round_trip() {
        let service = JwtService::new("test-secret");
        let user_id = ID::new(USER_TYPE_NAME);

        let token = service.create_token(&user_id).unwrap();
        let verified = service.verify_token(&token).unwrap();

        assert_eq!(verified, user_id);
    }

    #[test]
    fn rejects_garbage_tokens() {
        let service = JwtService::new("test-secret");
        assert!(service.verify_token("not-a-token").is_err());
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let signer = JwtService::new("secret-one");
        let verifier = JwtService::new("secret-two");

        let token = signer.create_token(&ID::new(USER_TYPE_NAME)).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }
}
