//! Authentication context: who is signed in and which bearer token to send.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::AuthError;

/// A token plus the user it belongs to, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Option<String>,
}

impl AuthSession {
    /// Build a session from a raw token, reading the user id from its JWT claims.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let user_id = jwt_subject(&token);
        Self { token, user_id }
    }
}

/// Best-effort `sub` claim of a JWT. `None` for anything that is not a JWT.
#[must_use]
pub fn jwt_subject(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("sub")?.as_str().map(str::to_string)
}

/// Provider of auth sessions.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current session, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the provider cannot be reached.
    async fn fetch_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// End the provider-side session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` when the provider rejects the sign-out.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Token source backed by configuration (`READING_API_TOKEN`).
#[derive(Debug, Default)]
pub struct StaticTokenSource {
    token: RwLock<Option<String>>,
}

impl StaticTokenSource {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|token| !token.trim().is_empty())),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env::var("READING_API_TOKEN").ok())
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn fetch_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(token.map(AuthSession::from_token))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Where the context currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Nothing loaded yet; the next `token()` call asks the source.
    #[default]
    Unknown,
    SignedIn(AuthSession),
    /// Terminal until an explicit sign-in event.
    SignedOut,
}

/// Notifications from the auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    TokenRefreshed,
    SignedOut,
}

/// Shared auth state handed to every API call.
pub struct AuthContext {
    source: Arc<dyn TokenSource>,
    state: RwLock<AuthState>,
}

impl AuthContext {
    #[must_use]
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            state: RwLock::new(AuthState::Unknown),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: AuthState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        match self.state() {
            AuthState::SignedIn(session) => session.user_id,
            AuthState::Unknown | AuthState::SignedOut => None,
        }
    }

    #[must_use]
    pub fn is_signed_out(&self) -> bool {
        self.state() == AuthState::SignedOut
    }

    /// Bearer token for the next request, loading the session on first use.
    pub async fn token(&self) -> Option<String> {
        match self.state() {
            AuthState::SignedIn(session) => Some(session.token),
            AuthState::SignedOut => None,
            AuthState::Unknown => self.load(LoadMode::Passive).await,
        }
    }

    /// Reload the session from the source. Does nothing once signed out.
    pub async fn refresh(&self) -> Option<String> {
        if self.is_signed_out() {
            return None;
        }
        self.load(LoadMode::Passive).await
    }

    /// Sign out locally and at the provider. Local state is cleared even if the
    /// provider call fails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` from the provider sign-out.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let outcome = self.source.sign_out().await;
        self.set_state(AuthState::SignedOut);
        log::info!("signed out");
        outcome
    }

    /// React to a provider notification.
    pub async fn handle_event(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn => {
                self.load(LoadMode::SignIn).await;
            }
            AuthEvent::TokenRefreshed => {
                self.refresh().await;
            }
            AuthEvent::SignedOut => self.set_state(AuthState::SignedOut),
        }
    }

    async fn load(&self, mode: LoadMode) -> Option<String> {
        let fetched = self.source.fetch_session().await;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        // A sign-out that landed while the fetch was in flight wins.
        if mode == LoadMode::Passive && *state == AuthState::SignedOut {
            log::debug!("dropping auth session loaded after sign-out");
            return None;
        }
        match fetched {
            Ok(Some(session)) => {
                let token = session.token.clone();
                *state = AuthState::SignedIn(session);
                Some(token)
            }
            Ok(None) => {
                *state = AuthState::SignedOut;
                None
            }
            Err(err) => {
                // Stay unknown so the next request tries again.
                log::warn!("failed to load auth session: {err}");
                *state = AuthState::Unknown;
                None
            }
        }
    }
}

/// Whether a load may leave the signed-out state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    Passive,
    SignIn,
}
