/// Authentication context passed to collaborators explicitly.
///
/// The session is created once at login and dropped at logout; nothing in the
/// client reads ambient process-wide auth state. The REST adapter attaches the
/// token (when present) as a bearer header on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session with no credentials; requests carry no Authorization header.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Session backed by an access token obtained from the login flow.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
