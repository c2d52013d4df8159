//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential checks and the admin capability gate here. Credentials come
//! from server configuration; the session mechanism itself belongs to the
//! cookie middleware.

use crate::domain::Error;

use super::ApiResult;
use super::session::SessionContext;

/// Administrator credentials from server configuration.
///
/// The admin capability is an email comparison: a session whose email matches
/// (case-insensitively) is allowed to mutate the catalog.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    /// Build the credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Configured admin email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether the given email identifies the administrator.
    #[must_use]
    pub fn is_admin(&self, email: &str) -> bool {
        email.eq_ignore_ascii_case(&self.email)
    }
}

/// Check the submitted credentials, returning the canonical session email.
pub fn authenticate(admin: &AdminCredentials, email: &str, password: &str) -> ApiResult<String> {
    if admin.is_admin(email) && password == admin.password {
        Ok(email.to_lowercase())
    } else {
        Err(Error::unauthorized("invalid credentials"))
    }
}

/// Require an authenticated admin session.
///
/// Returns `401` without a session and `403` for a session whose email is
/// not the administrator's.
pub fn require_admin(session: &SessionContext, admin: &AdminCredentials) -> ApiResult<String> {
    let email = session.require_email()?;
    if admin.is_admin(&email) {
        Ok(email)
    } else {
        Err(Error::forbidden("administrator access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn admin() -> AdminCredentials {
        AdminCredentials::new("julie@example.test", "correct horse")
    }

    #[rstest]
    fn valid_credentials_authenticate(admin: AdminCredentials) {
        let email = authenticate(&admin, "julie@example.test", "correct horse")
            .expect("valid credentials");
        assert_eq!(email, "julie@example.test");
    }

    #[rstest]
    fn email_comparison_ignores_case(admin: AdminCredentials) {
        let email =
            authenticate(&admin, "Julie@Example.Test", "correct horse").expect("valid credentials");
        assert_eq!(email, "julie@example.test");
        assert!(admin.is_admin("JULIE@EXAMPLE.TEST"));
    }

    #[rstest]
    #[case("julie@example.test", "wrong")]
    #[case("intruder@example.test", "correct horse")]
    fn invalid_credentials_are_unauthorised(
        admin: AdminCredentials,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let error = authenticate(&admin, email, password).expect_err("should fail");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
