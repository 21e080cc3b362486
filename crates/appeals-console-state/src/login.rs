use appeals_api_client::{ApiClientError, LoginRequest, LoginSuccess};
use appeals_client_core::login::check_login_fields;
use appeals_client_core::session::TokenPair;

/// The login form plus its inline alert.
#[derive(Debug, Default)]
pub struct LoginForm {
    username: String,
    password: String,
    error: Option<String>,
}

/// Outcome of a settled credential exchange.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginSettled {
    /// Hand the pair to the session store, then navigate to the appeals
    /// list (the default landing view).
    Authenticated(TokenPair),
    /// Stay on the form; the alert holds whatever the backend said.
    Rejected,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Runs the pre-network field checks. A prior alert is cleared up front,
    /// so a stale error never outlives a new attempt. Yields the request
    /// payload once both checks pass; otherwise the alert is set and nothing
    /// goes out.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        self.error = None;
        if let Err(check) = check_login_fields(&self.username, &self.password) {
            self.error = Some(check.to_string());
            return None;
        }
        Some(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Applies the credential-exchange response. A rejection sets the alert
    /// from the body's `error` field (a body without one leaves the alert
    /// empty) and touches neither the session nor navigation.
    pub fn finish_submit(
        &mut self,
        outcome: Result<LoginSuccess, ApiClientError>,
    ) -> LoginSettled {
        match outcome {
            Ok(success) => {
                self.error = None;
                LoginSettled::Authenticated(TokenPair::new(success.token, success.refresh_token))
            }
            Err(error) => {
                self.error = error.login_message();
                LoginSettled::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use appeals_api_client::StatusCode;

    use super::*;

    fn filled_form() -> LoginForm {
        let mut form = LoginForm::new();
        form.set_username("admin");
        form.set_password("admin");
        form
    }

    #[test]
    fn both_fields_empty_reports_the_username_error() {
        let mut form = LoginForm::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some("The username should not be empty"));
    }

    #[test]
    fn password_check_runs_only_after_username_passes() {
        let mut form = LoginForm::new();
        form.set_username("admin");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some("The password should not be empty"));
    }

    #[test]
    fn passing_checks_yields_the_request_payload() {
        let mut form = filled_form();
        let request = form.begin_submit();
        assert_eq!(
            request,
            Some(LoginRequest {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
        );
        assert_eq!(form.error(), None);
    }

    #[test]
    fn a_new_attempt_clears_the_stale_alert() {
        let mut form = LoginForm::new();
        form.begin_submit();
        assert!(form.error().is_some());

        form.set_username("admin");
        form.set_password("admin");
        assert!(form.begin_submit().is_some());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn server_rejection_surfaces_the_error_field_verbatim() {
        let mut form = filled_form();
        form.begin_submit();

        let settled = form.finish_submit(Err(ApiClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: Some("Internal error".to_string()),
        }));

        assert_eq!(settled, LoginSettled::Rejected);
        assert_eq!(form.error(), Some("Internal error"));
    }

    #[test]
    fn rejection_without_an_error_field_leaves_the_alert_empty() {
        let mut form = filled_form();
        form.begin_submit();

        form.finish_submit(Err(ApiClientError::Api {
            status: StatusCode::BAD_REQUEST,
            error: None,
        }));

        assert_eq!(form.error(), None);
    }

    #[test]
    fn success_yields_the_pair_and_clears_the_alert() {
        let mut form = filled_form();
        form.begin_submit();
        form.finish_submit(Err(ApiClientError::Api {
            status: StatusCode::UNAUTHORIZED,
            error: Some("Unauthorized".to_string()),
        }));

        form.begin_submit();
        let settled = form.finish_submit(Ok(LoginSuccess {
            token: "auth_token".to_string(),
            refresh_token: "refresh_token".to_string(),
        }));

        assert_eq!(
            settled,
            LoginSettled::Authenticated(TokenPair::new("auth_token", "refresh_token"))
        );
        assert_eq!(form.error(), None);
    }
}
