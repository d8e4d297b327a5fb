//! Session
//!
//! Authentication state of the storefront: who is logged in and with which
//! bearer token. The session is restored from the store at startup and
//! re-validated against the backend before it is trusted.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    gateway::{ApiError, AuthGateway},
    guard::Access,
    storage::{Store, StoreError, keys},
    users::{BearerToken, Credentials, User},
};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend rejected the credentials.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The account is not allowed to log in here.
    #[error("access denied")]
    Forbidden,

    /// The backend could not be reached.
    #[error("connection error, please try again")]
    Connection(#[source] ApiError),

    /// The backend answered with an unexpected failure.
    #[error("{0}")]
    Server(String),
}

impl From<ApiError> for SessionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::InvalidCredentials,
            ApiError::Forbidden => Self::Forbidden,
            ApiError::Connection(_) => Self::Connection(error),
            ApiError::Status { message, .. } => Self::Server(message),
            ApiError::NotFound | ApiError::Decode(_) | ApiError::InvalidFilter(_) => {
                Self::Server(error.to_string())
            }
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not restored from storage yet.
    Uninitialized,

    /// A restore or login is in flight.
    Loading,

    /// A user and token are present.
    Authenticated,

    /// Nobody is logged in.
    Anonymous,
}

/// Snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Logged in user.
    pub user: Option<User>,

    /// Bearer token of the logged in user.
    pub token: Option<BearerToken>,

    /// Whether a restore or login is still in flight.
    pub loading: bool,
}

impl SessionState {
    /// Both a user and a token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// A user with the admin role is present.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Flags consulted by the access guard.
    pub fn access(&self) -> Access {
        Access {
            is_authenticated: self.is_authenticated(),
            is_admin: self.is_admin(),
            loading: self.loading,
        }
    }
}

/// Owns the authentication state and its persistence.
#[derive(Debug)]
pub struct SessionStore<A: AuthGateway, S: Store> {
    gateway: A,
    store: S,
    user: Option<User>,
    token: Option<BearerToken>,
    phase: SessionPhase,
}

impl<A: AuthGateway, S: Store> SessionStore<A, S> {
    /// Create an uninitialized session. Call [`SessionStore::initialize`] before use.
    #[must_use]
    pub fn new(gateway: A, store: S) -> Self {
        Self {
            gateway,
            store,
            user: None,
            token: None,
            phase: SessionPhase::Uninitialized,
        }
    }

    /// Restore the persisted session and validate it against the backend.
    ///
    /// The persisted user is replaced by the backend's view of it. A rejected
    /// token clears the session and its storage; an unreachable backend leaves
    /// the session anonymous but keeps the stored token for the next start.
    pub async fn initialize(&mut self) {
        self.phase = SessionPhase::Loading;

        let token = self.read(keys::AUTH_TOKEN);
        let user = self.read(keys::AUTH_USER);

        let (Some(token), Some(user)) = (token, user) else {
            debug!("no stored session");
            self.finish_anonymous();
            return;
        };

        if let Err(source) = serde_json::from_str::<User>(&user) {
            warn!("discarding unreadable stored user: {source}");
            self.clear_storage();
            self.finish_anonymous();
            return;
        }

        let token = BearerToken::new(token);

        match self.gateway.current_user(&token).await {
            Ok(user) => {
                info!(username = %user.username, "session restored");
                self.write_user(&user);
                self.user = Some(user);
                self.token = Some(token);
                self.phase = SessionPhase::Authenticated;
            }
            Err(ApiError::Unauthorized | ApiError::Forbidden) => {
                warn!("stored session was rejected, clearing it");
                self.clear_storage();
                self.finish_anonymous();
            }
            Err(source) => {
                warn!("could not validate stored session: {source}");
                self.finish_anonymous();
            }
        }
    }

    /// Log in with `credentials`.
    ///
    /// On failure the session and its storage are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] describing why the backend refused the login.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&User, SessionError> {
        let previous = self.phase;

        self.phase = SessionPhase::Loading;

        let response = match self.gateway.login(credentials).await {
            Ok(response) => response,
            Err(source) => {
                warn!(
                    username = %credentials.username_or_email,
                    "login failed: {source}"
                );
                self.phase = previous;
                return Err(SessionError::from(source));
            }
        };

        let (token, user) = response.into_session_parts();

        if let Err(source) = self.store.set(keys::AUTH_TOKEN, token.as_str()) {
            error!("failed to persist auth token: {source}");
        }

        self.write_user(&user);

        info!(username = %user.username, role = ?user.role, "logged in");

        self.token = Some(token);
        self.phase = SessionPhase::Authenticated;

        Ok(self.user.insert(user))
    }

    /// Log out locally, forgetting the user and token.
    pub fn logout(&mut self) {
        debug!("logging out");

        self.clear_storage();
        self.finish_anonymous();
    }

    /// React to a 401 from any authenticated call.
    pub fn handle_unauthorized(&mut self) {
        warn!("backend rejected the session token, logging out");

        self.logout();
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        SessionState {
            user: self.user.clone(),
            token: self.token.clone(),
            loading: self.is_loading(),
        }
    }

    /// Flags consulted by the access guard.
    pub fn access(&self) -> Access {
        Access {
            is_authenticated: self.is_authenticated(),
            is_admin: self.is_admin(),
            loading: self.is_loading(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether no final decision can be made yet.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Uninitialized | SessionPhase::Loading
        )
    }

    /// Both a user and a token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// A user with the admin role is present.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Logged in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token of the logged in user.
    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(source) => {
                warn!("failed to read {key}: {source}");
                None
            }
        }
    }

    fn write_user(&mut self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(|source| source.to_string())
            .and_then(|json| {
                self.store
                    .set(keys::AUTH_USER, &json)
                    .map_err(|source: StoreError| source.to_string())
            });

        if let Err(message) = result {
            error!("failed to persist auth user: {message}");
        }
    }

    fn clear_storage(&mut self) {
        for key in [keys::AUTH_TOKEN, keys::AUTH_USER] {
            if let Err(source) = self.store.remove(key) {
                error!("failed to remove {key}: {source}");
            }
        }
    }

    fn finish_anonymous(&mut self) {
        self.user = None;
        self.token = None;
        self.phase = SessionPhase::Anonymous;
    }
}
