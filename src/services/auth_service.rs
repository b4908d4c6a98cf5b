//! Login flow and client-side token expiry checking.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;

use crate::error::AppError;
use crate::models::{TokenClaims, User};
use crate::services::ApiClient;
use crate::utils::constants::{STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_USER};
use crate::utils::{load_from_storage, load_raw, remove_from_storage, save_raw, save_to_storage};

/// Decode the JWT payload and compare `exp` to wall-clock time. No signature
/// verification happens client-side; the backend re-validates every request.
/// Anything undecodable counts as expired.
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, Utc::now().timestamp())
}

fn is_token_expired_at(token: &str, now_secs: i64) -> bool {
    let payload = match token.split('.').nth(1) {
        Some(p) => p,
        None => return true,
    };

    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(b) => b,
        Err(_) => return true,
    };

    match serde_json::from_slice::<TokenClaims>(&bytes) {
        Ok(claims) => claims.exp <= now_secs,
        Err(_) => true,
    }
}

/// Authenticate and persist the session. The token is stored verbatim under
/// `authToken`; the user profile is JSON under `user`.
pub async fn perform_login(phone: &str, password: &str) -> Result<User, AppError> {
    let client = ApiClient::new();
    let response = client.login(phone, password).await?;

    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| "Authentication failed".to_string());
        return Err(AppError::Auth(message));
    }

    let token = response
        .token
        .ok_or_else(|| AppError::Auth("No token in login response".to_string()))?;

    if is_token_expired(&token) {
        return Err(AppError::Auth(
            "Authentication token is expired. Please try again.".to_string(),
        ));
    }

    let user = response
        .user
        .ok_or_else(|| AppError::Auth("No user in login response".to_string()))?;

    save_raw(STORAGE_KEY_AUTH_TOKEN, &token)
        .map_err(AppError::Auth)?;
    save_to_storage(STORAGE_KEY_USER, &user).map_err(AppError::Auth)?;

    log::info!("✅ Login successful: {}", user.name);
    Ok(user)
}

/// Restore a previous session from local storage. An expired or garbled
/// token clears both keys and sends the user back to the login screen.
pub fn restore_session() -> Option<User> {
    let token = load_raw(STORAGE_KEY_AUTH_TOKEN)?;

    if is_token_expired(&token) {
        log::warn!("⚠️ Stored token expired, clearing session");
        clear_auth();
        return None;
    }

    match load_from_storage::<User>(STORAGE_KEY_USER) {
        Some(user) => {
            log::info!("✅ Session restored: {}", user.name);
            Some(user)
        }
        None => {
            clear_auth();
            None
        }
    }
}

pub fn clear_auth() {
    let _ = remove_from_storage(STORAGE_KEY_AUTH_TOKEN);
    let _ = remove_from_storage(STORAGE_KEY_USER);
    log::info!("👋 Auth cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_jwt(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(json!({ "exp": exp, "sub": "42" }).to_string().as_bytes());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn future_exp_is_not_expired() {
        let token = fake_jwt(2_000_000_000);
        assert!(!is_token_expired_at(&token, 1_700_000_000));
    }

    #[test]
    fn past_exp_is_expired() {
        let token = fake_jwt(1_600_000_000);
        assert!(is_token_expired_at(&token, 1_700_000_000));
    }

    #[test]
    fn garbage_tokens_count_as_expired() {
        assert!(is_token_expired_at("", 0));
        assert!(is_token_expired_at("not-a-jwt", 0));
        assert!(is_token_expired_at("a.!!!not-base64!!!.c", 0));
        let no_exp = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"{\"sub\":\"x\"}"));
        assert!(is_token_expired_at(&no_exp, 0));
    }
}
