//! Authentication state machine: `Unauthenticated` ⇄ `Authenticated`.

use std::time::Duration;

use api_types::auth::{Login, Profile, SessionCreated, Signup};

use crate::client::{Client, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    Authenticated,
}

impl Session {
    /// Any probe failure (network, 401, bad body) means no usable session.
    pub fn from_probe(result: &Result<Profile, ClientError>) -> Self {
        match result {
            Ok(_) => Self::Authenticated,
            Err(_) => Self::Unauthenticated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Welcome back",
            Self::Signup => "Create your planner account",
        }
    }

    pub fn fields(self) -> &'static [AuthField] {
        match self {
            Self::Login => &[AuthField::Email, AuthField::Password],
            Self::Signup => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

impl AuthField {
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Password => "Password (min 6 chars)",
        }
    }
}

/// Validated payload ready to be posted.
#[derive(Debug, Clone)]
pub enum Credentials {
    Login(Login),
    Signup(Signup),
}

impl Credentials {
    pub async fn submit(&self, client: &Client) -> Result<SessionCreated, ClientError> {
        match self {
            Self::Login(payload) => client.login(payload).await,
            Self::Signup(payload) => client.signup(payload).await,
        }
    }
}

#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub error: Option<String>,
    pub pending: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            error: None,
            pending: false,
        }
    }
}

impl AuthForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.focus = self.mode.fields()[0];
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focus = step(self.mode.fields(), self.focus, 1);
    }

    pub fn prev_field(&mut self) {
        let fields = self.mode.fields();
        self.focus = step(fields, self.focus, fields.len() - 1);
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn input(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Checks required fields and builds the payload for the current mode.
    pub fn credentials(&self) -> Result<Credentials, String> {
        let email = self.email.trim();
        let name = self.name.trim();

        if email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required.".to_string());
        }

        match self.mode {
            AuthMode::Login => Ok(Credentials::Login(Login {
                email: email.to_string(),
                password: self.password.clone(),
            })),
            AuthMode::Signup if name.is_empty() => Err("Full name is required.".to_string()),
            AuthMode::Signup => Ok(Credentials::Signup(Signup {
                name: name.to_string(),
                email: email.to_string(),
                password: self.password.clone(),
            })),
        }
    }

    /// Applies the outcome of a login/signup call and returns the new session
    /// state.
    pub fn finish(&mut self, result: Result<SessionCreated, ClientError>) -> Session {
        self.pending = false;
        match result {
            Ok(created) => {
                tracing::info!(
                    name = created.name.as_deref().unwrap_or(""),
                    "session created"
                );
                self.password.clear();
                self.error = None;
                Session::Authenticated
            }
            Err(err) => {
                tracing::warn!("authentication failed: {err}");
                self.error = Some(err.to_string());
                Session::Unauthenticated
            }
        }
    }
}

/// How long logout waits for the server before dropping the session anyway.
pub const LOGOUT_WAIT: Duration = Duration::from_secs(5);

/// Logs out. The transition is unconditional: whatever the server answers, or
/// if it does not answer within `wait`, the client drops to `Unauthenticated`.
pub async fn logout(client: &Client, wait: Duration) -> Session {
    match tokio::time::timeout(wait, client.logout()).await {
        Ok(Ok(_)) => tracing::info!("logged out"),
        Ok(Err(err)) => tracing::warn!("logout call failed, dropping session anyway: {err}"),
        Err(_) => tracing::warn!(?wait, "logout call timed out, dropping session anyway"),
    }
    Session::Unauthenticated
}

fn step(fields: &[AuthField], current: AuthField, by: usize) -> AuthField {
    let idx = fields.iter().position(|f| *f == current).unwrap_or(0);
    fields[(idx + by) % fields.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_email_and_password() {
        let mut form = AuthForm::default();
        form.email = "a@b.com".to_string();
        assert!(form.credentials().is_err());

        form.password = "secret".to_string();
        assert!(matches!(form.credentials(), Ok(Credentials::Login(_))));
    }

    #[test]
    fn signup_requires_name() {
        let mut form = AuthForm::default();
        form.toggle_mode();
        form.email = "a@b.com".to_string();
        form.password = "secret".to_string();
        assert_eq!(form.credentials().unwrap_err(), "Full name is required.");

        form.name = "Asha".to_string();
        let Ok(Credentials::Signup(payload)) = form.credentials() else {
            panic!("expected signup payload");
        };
        assert_eq!(payload.name, "Asha");
    }

    #[test]
    fn toggle_resets_focus_and_error() {
        let mut form = AuthForm {
            error: Some("Invalid login details.".to_string()),
            focus: AuthField::Password,
            ..AuthForm::default()
        };
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Signup);
        assert_eq!(form.focus, AuthField::Name);
        assert!(form.error.is_none());
    }

    #[test]
    fn focus_cycles_through_mode_fields() {
        let mut form = AuthForm::default();
        form.next_field();
        assert_eq!(form.focus, AuthField::Password);
        form.next_field();
        assert_eq!(form.focus, AuthField::Email);
        form.prev_field();
        assert_eq!(form.focus, AuthField::Password);
    }

    #[test]
    fn failed_login_keeps_session_and_shows_server_error() {
        let mut form = AuthForm::default();
        let session = form.finish(Err(ClientError::Unauthorized(
            "invalid credentials".to_string(),
        )));
        assert_eq!(session, Session::Unauthenticated);
        assert_eq!(form.error.as_deref(), Some("invalid credentials"));
    }

    #[test]
    fn successful_login_wipes_password() {
        let mut form = AuthForm {
            password: "secret".to_string(),
            error: Some("old".to_string()),
            pending: true,
            ..AuthForm::default()
        };
        let session = form.finish(Ok(SessionCreated::default()));
        assert_eq!(session, Session::Authenticated);
        assert!(form.password.is_empty());
        assert!(form.error.is_none());
        assert!(!form.pending);
    }

    #[test]
    fn probe_failure_means_unauthenticated() {
        let err: Result<Profile, ClientError> =
            Err(ClientError::Unauthorized("Please login first.".to_string()));
        assert_eq!(Session::from_probe(&err), Session::Unauthenticated);
    }
}
