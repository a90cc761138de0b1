use crate::{
    error::AppError,
    models::{Claims, TokenType},
};
use jsonwebtoken::{DecodingKey, Validation, decode};

/// Verifies an access token. Refresh tokens are rejected even when their signature is valid.
pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {e}")))?;

    if claims.token_type != TokenType::Access {
        return Err(AppError::unauthorized("Access token required"));
    }

    Ok(claims)
}

#[cfg(test)]
pub fn issue_test_token(token_type: TokenType, secret: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = chrono::Utc::now().timestamp() + ttl_secs;
    let claims = Claims {
        user_id: 7,
        sub: "manager".to_string(),
        exp: exp.max(0) as usize,
        token_type,
        employee_id: Some(1001),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_access_token() {
        let token = issue_test_token(TokenType::Access, "s3cret", 600);
        let claims = verify_access_token(&token, "s3cret").unwrap();
        assert_eq!(claims.sub, "manager");
        assert_eq!(claims.employee_id, Some(1001));
    }

    #[test]
    fn rejects_refresh_token() {
        let token = issue_test_token(TokenType::Refresh, "s3cret", 600);
        let err = verify_access_token(&token, "s3cret").unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Access token required");
    }

    #[test]
    fn rejects_wrong_secret_and_expired() {
        let token = issue_test_token(TokenType::Access, "s3cret", 600);
        assert!(verify_access_token(&token, "other").is_err());

        let expired = issue_test_token(TokenType::Access, "s3cret", -3600);
        assert!(verify_access_token(&expired, "s3cret").is_err());
    }
}
