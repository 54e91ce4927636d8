use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::otp::PasswordReset;
use crate::auth::password;
use crate::auth::repo::{Role, User};
use crate::email::otp_email_body;
use crate::error::ApiError;
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Argon2 is deliberately expensive; keep it off the async executor.
async fn hash_password_blocking(plain: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?
        .map_err(ApiError::Internal)
}

async fn verify_password_blocking(plain: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || password::verify_password(&plain, &hash))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?
        .map_err(ApiError::Internal)
}

pub async fn register(state: &AppState, mut payload: RegisterRequest) -> Result<AuthResponse, ApiError> {
    payload.email = normalize_email(&payload.email);

    if payload.name.trim().is_empty() || payload.lastname.trim().is_empty() {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 6 {
        warn!("password too short");
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password_blocking(payload.password.clone()).await?;
    let role = payload.role.unwrap_or(Role::Artist);

    let user = match User::create(
        &state.db,
        payload.name.trim(),
        payload.lastname.trim(),
        &payload.email,
        &hash,
        role,
    )
    .await
    {
        Ok(u) => u,
        // a concurrent register can slip past the pre-check; the unique
        // index is authoritative
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered (unique index)");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let keys = JwtKeys::from_ref(state);
    let token = keys.sign_access(user.id, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthResponse {
        message: "Registration successful".into(),
        token,
        user: user.into(),
    })
}

pub async fn login(state: &AppState, mut payload: LoginRequest) -> Result<AuthResponse, ApiError> {
    payload.email = normalize_email(&payload.email);

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".into(),
        ));
    }

    // unknown email and wrong password are indistinguishable to the client
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    let ok = verify_password_blocking(payload.password.clone(), user.password_hash.clone()).await?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    // token role comes from the stored record only
    let keys = JwtKeys::from_ref(state);
    let token = keys.sign_access(user.id, user.role)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse {
        message: "Login successful".into(),
        token,
        user: user.into(),
    })
}

pub async fn forgot_password(state: &AppState, email: &str) -> Result<(), ApiError> {
    let email = normalize_email(email);

    if email.is_empty() {
        return Err(ApiError::Validation("Email is required".into()));
    }
    if !state.otp_throttle.check(&email) {
        warn!(%email, "forgot-password throttled");
        return Err(ApiError::TooManyRequests);
    }

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let otp = PasswordReset::issue(&state.db, &user.email).await?;

    // fire-and-forget delivery; failures are logged, never surfaced
    let mailer = state.mailer.clone();
    let to = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer
            .send(&to, "Password Reset OTP", &otp_email_body(&otp))
            .await
        {
            error!(error = %e, %to, "failed to send otp email");
        }
    });

    info!(email = %user.email, "password reset otp issued");
    Ok(())
}

/// Check the OTP and mint the reset ticket the client must present to
/// reset-password. The OTP record stays (marked verified) until consumed.
pub async fn verify_otp(state: &AppState, email: &str, otp: &str) -> Result<String, ApiError> {
    let email = normalize_email(email);

    if email.is_empty() || otp.trim().is_empty() {
        return Err(ApiError::Validation("Email and OTP are required".into()));
    }

    let matched = PasswordReset::verify(&state.db, &email, otp.trim()).await?;
    if !matched {
        warn!(%email, "otp verification failed");
        return Err(ApiError::Validation("Invalid or expired OTP".into()));
    }

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid or expired OTP".into()))?;

    let keys = JwtKeys::from_ref(state);
    let ticket = keys.sign_reset(user.id, user.role)?;

    info!(user_id = %user.id, "otp verified, reset ticket issued");
    Ok(ticket)
}

/// Completing the reset requires both the signed ticket and a still-valid,
/// previously-verified OTP record, consumed exactly once — email plus new
/// password alone can never rotate a credential.
pub async fn reset_password(
    state: &AppState,
    reset_token: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    if new_password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let keys = JwtKeys::from_ref(state);
    let claims = keys
        .verify_reset(reset_token)
        .map_err(|_| ApiError::Validation("Invalid or expired reset ticket".into()))?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let consumed = PasswordReset::consume_verified(&state.db, &user.email).await?;
    if !consumed {
        warn!(user_id = %user.id, "reset without a verified otp");
        return Err(ApiError::Validation("Invalid or expired OTP".into()));
    }

    let hash = hash_password_blocking(new_password.to_string()).await?;
    User::update_password(&state.db, &user.email, &hash).await?;
    PasswordReset::invalidate(&state.db, &user.email).await?;

    info!(user_id = %user.id, "password reset completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn email_validation_rejects_garbage() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@"));
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ana@X.Com "), "ana@x.com");
    }

    #[tokio::test]
    async fn blocking_hash_roundtrip() {
        let hash = hash_password_blocking("secret1".into()).await.unwrap();
        assert!(verify_password_blocking("secret1".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("wrong".into(), hash).await.unwrap());
    }
}
