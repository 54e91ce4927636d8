use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::{Role, User};

/// Request body for user registration. Role is optional and defaults to
/// artist; it is only honored here, never at login.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request body for login. Deliberately has no role field: any role a
/// client sends is dropped at deserialization and the stored role wins.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Field names follow the original client contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub reset_token: String,
    pub new_password: String,
}

/// Public part of the user returned to clients. Built from the record, so
/// the password hash can never leak through it.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            lastname: u.lastname,
            email: u.email,
            role: u.role,
            is_verified: u.is_verified,
            created_at: u.created_at,
        }
    }
}

/// Response returned after register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    pub reset_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_discards_client_role() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"email":"ana@x.com","password":"secret1","role":"recruiter"}"#,
        )
        .expect("unknown fields are ignored");
        assert_eq!(req.email, "ana@x.com");
    }

    #[test]
    fn reset_request_uses_camel_case() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"resetToken":"abc","newPassword":"secret2"}"#,
        )
        .unwrap();
        assert_eq!(req.reset_token, "abc");
        assert_eq!(req.new_password, "secret2");
    }

    #[test]
    fn public_user_serializes_role_lowercase() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            lastname: "Lee".into(),
            email: "ana@x.com".into(),
            role: Role::Artist,
            is_verified: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"artist\""));
        assert!(!json.contains("password"));
    }
}
