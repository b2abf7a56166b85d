use std::sync::Arc;
use tokio::sync::watch;

use crate::sync::supabase_auth::{
    validate_credentials, AuthApi, AuthError, Session, SessionStorage, SignUpOutcome, User,
};

/// Owns the one authenticated-session value of the application and announces
/// every change of it to subscribers.
pub struct AuthSession {
    api: Arc<dyn AuthApi>,
    storage: SessionStorage,
    sender: watch::Sender<Option<Session>>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn AuthApi>, storage: SessionStorage) -> Self {
        let initial = match storage.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                None
            }
        };
        let (sender, _) = watch::channel(initial);
        Self { api, storage, sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    /// Returns the current session, refreshing it first when it is about to
    /// expire. A session that cannot be refreshed is dropped.
    pub async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.current() else {
            return Ok(None);
        };

        if !session.needs_refresh() {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            if session.is_valid() {
                return Ok(Some(session));
            }
            tracing::info!("Session expired without refresh token");
            self.replace(None)?;
            return Ok(None);
        };

        match self.api.refresh_session(refresh_token).await {
            Ok(refreshed) => {
                self.replace(Some(refreshed.clone()))?;
                Ok(Some(refreshed))
            }
            Err(AuthError::HttpError(e)) if session.is_valid() => {
                tracing::warn!("Session refresh failed, keeping current token: {}", e);
                Ok(Some(session))
            }
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                self.replace(None)?;
                Ok(None)
            }
        }
    }

    pub async fn access_token(&self) -> Result<String, AuthError> {
        self.get_session()
            .await?
            .map(|session| session.access_token)
            .ok_or(AuthError::NoSession)
    }

    /// Looks the signed-in user up remotely. A rejected token ends the session.
    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        let Some(session) = self.get_session().await? else {
            return Ok(None);
        };

        match self.api.get_user(&session.access_token).await {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::Unauthorized) => {
                self.replace(None)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_credentials(email, password)?;
        let session = self.api.sign_in_with_password(email.trim(), password).await?;
        self.replace(Some(session.clone()))?;
        tracing::info!("Signed in as {}", session.user.id);
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        validate_credentials(email, password)?;
        let outcome = self.api.sign_up(email.trim(), password).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.replace(Some(session.clone()))?;
        }
        Ok(outcome)
    }

    /// Ends the session locally whatever the remote answer is; the remote
    /// result is still returned to the caller.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.current() else {
            return Ok(());
        };

        let remote = match self.api.sign_out(&session.access_token).await {
            Err(AuthError::Unauthorized) => Ok(()),
            other => other,
        };
        self.replace(None)?;
        tracing::info!("Signed out {}", session.user.id);
        remote
    }

    /// Drops the session after the data service rejected its token.
    pub fn invalidate(&self) {
        if self.current().is_none() {
            return;
        }
        tracing::warn!("Session rejected by remote service");
        if let Err(e) = self.replace(None) {
            tracing::error!("Failed to clear stored session: {}", e);
        }
    }

    fn replace(&self, session: Option<Session>) -> Result<(), AuthError> {
        let persisted = match &session {
            Some(session) => self.storage.save(session),
            None => self.storage.clear(),
        };
        self.sender.send_replace(session);
        persisted
    }
}
