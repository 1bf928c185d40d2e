use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a bearer token.
///
/// Tokens are signed but carry no expiration claim; a token stays valid for
/// as long as the signing secret does.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub id: Uuid,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,

    #[error("missing bearer token")]
    MissingToken,

    #[error("token signing secret not configured")]
    InvalidSecret,

    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("password hashing error: {0}")]
    Hashing(String),
}

/// Hash a plaintext password with bcrypt.
///
/// The salt is generated per call, so hashing the same plaintext twice
/// yields different hashes.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a plaintext password against a stored bcrypt hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, hash).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Sign a bearer token for the given claims.
pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate a bearer token and extract its claims.
///
/// Fails with `AuthError::InvalidToken` when the token is malformed or the
/// signature does not match.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens are issued without an exp claim
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| AuthError::InvalidToken)?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the hashing tests fast
    const TEST_COST: u32 = 4;
    const SECRET: &str = "unit-test-secret";

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("sekret", TEST_COST).unwrap();

        assert!(verify_password("sekret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("sekret", TEST_COST).unwrap();
        let second = hash_password("sekret", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify_password("sekret", &first).unwrap());
        assert!(verify_password("sekret", &second).unwrap());
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let id = Uuid::new_v4();
        let claims = Claims { username: "root".to_string(), id };

        let token = generate_token(&claims, SECRET).unwrap();
        let decoded = verify_token(&token, SECRET).unwrap();

        assert_eq!(decoded.username, "root");
        assert_eq!(decoded.id, id);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims { username: "root".to_string(), id: Uuid::new_v4() };
        let token = generate_token(&claims, SECRET).unwrap();

        let mut tampered = token.clone();
        tampered.pop();

        assert!(matches!(verify_token(&tampered, SECRET), Err(AuthError::InvalidToken)));
        assert!(matches!(verify_token("not-a-token", SECRET), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims { username: "root".to_string(), id: Uuid::new_v4() };
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(matches!(verify_token(&token, "other-secret"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn empty_secret_is_an_error() {
        let claims = Claims { username: "root".to_string(), id: Uuid::new_v4() };

        assert!(matches!(generate_token(&claims, ""), Err(AuthError::InvalidSecret)));
        assert!(matches!(verify_token("whatever", ""), Err(AuthError::InvalidSecret)));
    }
}
