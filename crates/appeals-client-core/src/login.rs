use thiserror::Error;

/// Field checks that run before any network call. The wording is part of the
/// contract with the login view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LoginFieldError {
    #[error("The username should not be empty")]
    EmptyUsername,
    #[error("The password should not be empty")]
    EmptyPassword,
}

/// Username first, then password; the first failing check wins and nothing
/// is sent to the backend.
pub fn check_login_fields(username: &str, password: &str) -> Result<(), LoginFieldError> {
    if username.is_empty() {
        return Err(LoginFieldError::EmptyUsername);
    }
    if password.is_empty() {
        return Err(LoginFieldError::EmptyPassword);
    }
    Ok(())
}
