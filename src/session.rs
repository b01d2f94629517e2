//! Admin session gate: shared-password check and a signed, stateless
//! session cookie. No server-side session table exists; the cookie carries
//! `nonce.sha256(secret || nonce)` and is verified on every admin request.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "homecheck_admin";

const NONCE_BYTES: usize = 16;
const MAX_COOKIE_HEADER_LEN: usize = 8192;

#[derive(Clone)]
pub struct SessionGate {
    secret: String,
    admin_password: String,
}

impl SessionGate {
    pub fn new(secret: String, admin_password: String) -> Self {
        assert!(!secret.is_empty(), "Session secret must be provided");
        assert!(!admin_password.is_empty(), "Admin password must be provided");
        Self {
            secret,
            admin_password,
        }
    }

    /// Shared-secret comparison; there is no hashing, lockout, or rate
    /// limiting on this gate.
    pub fn check_password(&self, candidate: &str) -> bool {
        candidate == self.admin_password
    }

    /// Mints a fresh privileged-session token.
    pub fn issue_token(&self) -> String {
        let mut nonce = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut nonce);
        let nonce = hex::encode(nonce);
        let sig = self.sign(&nonce);
        format!("{nonce}.{sig}")
    }

    pub fn verify_token(&self, token: &str) -> bool {
        let Some((nonce, sig)) = token.split_once('.') else {
            return false;
        };
        if nonce.len() != NONCE_BYTES * 2 || hex::decode(nonce).is_err() {
            return false;
        }
        self.sign(nonce) == sig
    }

    /// Gate for every admin route. Absent or invalid cookie redirects to the
    /// login prompt rather than returning an error status.
    pub fn require(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        match cookie_value(headers, SESSION_COOKIE) {
            Some(token) if self.verify_token(&token) => Ok(()),
            _ => Err(ApiError::AuthRequired),
        }
    }

    pub fn login_cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.issue_token()
        )
    }

    pub fn logout_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }

    fn sign(&self, nonce: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(nonce.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Extracts one cookie's value from the request's Cookie headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    assert!(!name.is_empty(), "Cookie name must be non-empty");
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        if raw.len() > MAX_COOKIE_HEADER_LEN {
            continue;
        }
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.split_once('=') {
                if key.trim() == name {
                    return Some(value.trim().to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> SessionGate {
        SessionGate::new("test-secret".to_string(), "hunter2".to_string())
    }

    #[test]
    fn issued_token_verifies() {
        let gate = gate();
        let token = gate.issue_token();
        assert!(gate.verify_token(&token));
    }

    #[test]
    fn tampered_token_rejected() {
        let gate = gate();
        let mut token = gate.issue_token();
        let last = token.pop().unwrap();
        token.push(if last == '0' { '1' } else { '0' });
        assert!(!gate.verify_token(&token));
        assert!(!gate.verify_token("not-a-token"));
        assert!(!gate.verify_token(""));
    }

    #[test]
    fn token_bound_to_secret() {
        let token = gate().issue_token();
        let other = SessionGate::new("other-secret".to_string(), "hunter2".to_string());
        assert!(!other.verify_token(&token));
    }

    #[test]
    fn password_check_is_exact() {
        let gate = gate();
        assert!(gate.check_password("hunter2"));
        assert!(!gate.check_password("hunter"));
        assert!(!gate.check_password(""));
    }

    #[test]
    fn cookie_parsing_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; homecheck_admin=abc.def; lang=en"),
        );
        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc.def")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn require_redirects_without_cookie() {
        let gate = gate();
        let headers = HeaderMap::new();
        assert!(matches!(
            gate.require(&headers),
            Err(ApiError::AuthRequired)
        ));
    }

    #[test]
    fn require_accepts_valid_cookie() {
        let gate = gate();
        let mut headers = HeaderMap::new();
        let cookie = format!("{SESSION_COOKIE}={}", gate.issue_token());
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());
        assert!(gate.require(&headers).is_ok());
    }
}
