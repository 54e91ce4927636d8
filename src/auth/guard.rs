use uuid::Uuid;

use crate::auth::jwt::AuthUser;
use crate::auth::repo::Role;
use crate::error::ApiError;

/// Role gate for protected routes. Compares the verified token role against
/// the permitted set; the role never comes from client-supplied input.
pub fn require_role(user: &AuthUser, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".into(),
        ))
    }
}

/// Ownership gate for mutating operations. Non-owners get Forbidden, not
/// NotFound: the resource was already looked up by the caller.
pub fn assert_owner(owner_id: Uuid, requester_id: Uuid) -> Result<(), ApiError> {
    if owner_id == requester_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You are not allowed to modify this resource".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn require_role_passes_a_permitted_role() {
        assert!(require_role(&user(Role::Recruiter), &[Role::Recruiter]).is_ok());
        assert!(require_role(&user(Role::Artist), &[Role::Artist, Role::Recruiter]).is_ok());
    }

    #[test]
    fn require_role_rejects_with_forbidden() {
        let err = require_role(&user(Role::Artist), &[Role::Recruiter]).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn owner_may_mutate() {
        let id = Uuid::new_v4();
        assert!(assert_owner(id, id).is_ok());
    }

    #[test]
    fn non_owner_gets_forbidden() {
        let err = assert_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
