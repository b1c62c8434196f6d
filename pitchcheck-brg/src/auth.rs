use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};

/// Check `Authorization: Bearer <secret>` without leaking, through timing,
/// how much of the secret matched. Both sides are hashed first so the
/// comparison always runs over 32 bytes.
pub fn bearer_matches(headers: &HeaderMap, secret: &str) -> bool {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return false;
    };
    constant_time_eq(token.as_bytes(), secret.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let da = Sha256::digest(a);
    let db = Sha256::digest(b);
    da.iter().zip(db.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
