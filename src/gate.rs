use crate::sync::auth_session::AuthSession;
use crate::sync::supabase_auth::{Session, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Unauthenticated,
    Authenticated(User),
}

/// Decides which route may be shown for the current session.
#[derive(Debug, Clone)]
pub struct SessionGate {
    state: GateState,
    route: Route,
}

impl SessionGate {
    pub fn new(requested: Route) -> Self {
        Self {
            state: GateState::Unauthenticated,
            route: requested,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            GateState::Authenticated(user) => Some(user),
            GateState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, GateState::Authenticated(_))
    }

    /// Initial session check. A failing check counts as signed out.
    pub async fn on_mount(&mut self, auth: &AuthSession) -> Route {
        let session = match auth.get_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Session check failed: {}", e);
                None
            }
        };
        self.on_session_change(session.as_ref())
    }

    pub fn on_session_change(&mut self, session: Option<&Session>) -> Route {
        self.state = match session {
            Some(session) => GateState::Authenticated(session.user.clone()),
            None => GateState::Unauthenticated,
        };
        self.navigate(self.route)
    }

    pub fn navigate(&mut self, to: Route) -> Route {
        self.route = match (to, self.is_authenticated()) {
            (Route::Dashboard, false) => Route::Login,
            (Route::Login, true) => Route::Dashboard,
            (route, _) => route,
        };
        if self.route != to {
            tracing::info!("Redirected from {:?} to {:?}", to, self.route);
        }
        self.route
    }

    /// Best-effort sign-out when the application closes: one attempt, the
    /// outcome is only logged.
    pub async fn on_close(&self, auth: &AuthSession) {
        if auth.current().is_none() {
            return;
        }
        match auth.sign_out().await {
            Ok(()) => tracing::info!("Signed out on close"),
            Err(e) => tracing::warn!("Sign-out on close failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::supabase_auth::{AuthError, MockAuthApi, SessionStorage};
    use std::sync::Arc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn create_session() -> Session {
        Session::new(
            "token".to_string(),
            3600,
            User {
                id: Uuid::from_u128(1),
                email: Some("ana@example.com".to_string()),
            },
        )
    }

    fn create_auth(api: MockAuthApi, dir: &TempDir, stored: Option<Session>) -> AuthSession {
        let storage = SessionStorage::new(dir.path().join("session.json"));
        if let Some(session) = stored {
            storage.save(&session).unwrap();
        }
        AuthSession::new(Arc::new(api), storage)
    }

    #[test]
    fn dashboard_requires_session() {
        let mut gate = SessionGate::new(Route::Login);

        assert_eq!(gate.navigate(Route::Dashboard), Route::Login);
    }

    #[test]
    fn signup_is_reachable_without_session() {
        let mut gate = SessionGate::new(Route::Login);

        assert_eq!(gate.navigate(Route::Signup), Route::Signup);
    }

    #[test]
    fn login_moves_on_to_dashboard_when_signed_in() {
        let mut gate = SessionGate::new(Route::Login);

        let route = gate.on_session_change(Some(&create_session()));

        assert_eq!(route, Route::Dashboard);
        assert!(gate.is_authenticated());
    }

    #[test]
    fn lost_session_redirects_dashboard_to_login() {
        let mut gate = SessionGate::new(Route::Dashboard);
        gate.on_session_change(Some(&create_session()));

        let route = gate.on_session_change(None);

        assert_eq!(route, Route::Login);
        assert_eq!(gate.state(), &GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn mount_without_session_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let auth = create_auth(MockAuthApi::new(), &dir, None);
        let mut gate = SessionGate::new(Route::Dashboard);

        assert_eq!(gate.on_mount(&auth).await, Route::Login);
    }

    #[tokio::test]
    async fn mount_with_stored_session_opens_dashboard() {
        let dir = TempDir::new().unwrap();
        let auth = create_auth(MockAuthApi::new(), &dir, Some(create_session()));
        let mut gate = SessionGate::new(Route::Dashboard);

        assert_eq!(gate.on_mount(&auth).await, Route::Dashboard);
        assert_eq!(gate.user().map(|u| u.id), Some(Uuid::from_u128(1)));
    }

    #[tokio::test]
    async fn sign_out_then_dashboard_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let mut api = MockAuthApi::new();
        api.expect_sign_out().times(1).returning(|_| Ok(()));
        let auth = create_auth(api, &dir, Some(create_session()));
        let mut gate = SessionGate::new(Route::Dashboard);
        gate.on_mount(&auth).await;
        let mut changes = auth.subscribe();

        auth.sign_out().await.unwrap();
        let session = changes.borrow_and_update().clone();
        gate.on_session_change(session.as_ref());

        assert_eq!(auth.current(), None);
        assert_eq!(gate.navigate(Route::Dashboard), Route::Login);
    }

    #[tokio::test]
    async fn close_signs_out_once_and_ignores_failure() {
        let dir = TempDir::new().unwrap();
        let mut api = MockAuthApi::new();
        api.expect_sign_out()
            .times(1)
            .returning(|_| Err(AuthError::Rejected("offline".to_string())));
        let auth = create_auth(api, &dir, Some(create_session()));
        let gate = SessionGate::new(Route::Dashboard);

        gate.on_close(&auth).await;

        assert_eq!(auth.current(), None);
    }

    #[tokio::test]
    async fn close_without_session_sends_nothing() {
        let dir = TempDir::new().unwrap();
        let mut api = MockAuthApi::new();
        api.expect_sign_out().times(0);
        let auth = create_auth(api, &dir, None);

        SessionGate::new(Route::Login).on_close(&auth).await;
    }
}
