use jsonwebtoken::{encode, EncodingKey, Header};

use crate::error::Result;
use crate::middleware::auth::Claims;

/// Signs a session token that `require_session` will accept.
pub fn issue_token(secret: &str, claims: &Claims) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}
