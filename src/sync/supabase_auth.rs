use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read session file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse session: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Session is no longer valid")]
    Unauthorized,
    #[error("Not signed in")]
    NoSession,
    #[error("No refresh token available")]
    NoRefreshToken,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

impl User {
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("(no email)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
    pub user: User,
}

impl Session {
    pub fn new(access_token: String, expires_in_seconds: i64, user: User) -> Self {
        Self {
            access_token,
            refresh_token: None,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in_seconds),
            token_type: "bearer".to_string(),
            user,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: String) -> Self {
        self.refresh_token = Some(refresh_token);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }

    pub fn needs_refresh(&self) -> bool {
        let buffer = chrono::Duration::minutes(5);
        self.expires_at <= Utc::now() + buffer
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired { email: String },
}

pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>, AuthError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let email_pattern = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
    });

    if email.trim().is_empty() {
        return Err(AuthError::InvalidInput("Email is required".to_string()));
    }
    if !email_pattern.is_match(email.trim()) {
        return Err(AuthError::InvalidInput(format!("'{}' is not a valid email address", email.trim())));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("Password is required".to_string()));
    }
    Ok(())
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    async fn get_user(&self, access_token: &str) -> Result<User, AuthError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError>;
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    user: User,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    user: Option<User>,
    id: Option<Uuid>,
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or_else(|| match self.error {
                Some(serde_json::Value::String(error)) => Some(error),
                _ => None,
            })
    }
}

pub struct SupabaseAuthClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseAuthClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn convert_session(&self, response: SessionResponse) -> Session {
        let mut session = Session::new(response.access_token, response.expires_in, response.user);
        if let Some(token_type) = response.token_type {
            session.token_type = token_type;
        }
        match response.refresh_token {
            Some(refresh_token) => session.with_refresh_token(refresh_token),
            None => session,
        }
    }

    async fn rejection(&self, response: reqwest::Response) -> AuthError {
        let status = response.status();
        if status == 401 {
            return AuthError::Unauthorized;
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AuthError::HttpError(e),
        };
        tracing::error!("Auth request failed. Status: {}, Body: {}", status, body);
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| format!("Status {}: {}", status, body));
        AuthError::Rejected(message)
    }

    async fn token_grant(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, AuthError> {
        let response = self.client
            .post(self.endpoint("token"))
            .header("apikey", &self.api_key)
            .query(&[("grant_type", grant_type)])
            .json(&body)
            .send()
            .await?;

        tracing::info!("Token grant '{}' response status: {}", grant_type, response.status());

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let session_response: SessionResponse = response.json().await?;
        Ok(self.convert_session(session_response))
    }
}

#[async_trait]
impl AuthApi for SupabaseAuthClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::info!("Signing in {}", email);
        let body = serde_json::json!({ "email": email, "password": password });
        self.token_grant("password", body).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        tracing::info!("Signing up {}", email);

        let response = self.client
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        tracing::info!("Sign up response status: {}", response.status());

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let sign_up: SignUpResponse = response.json().await?;

        if let (Some(access_token), Some(user)) = (sign_up.access_token, sign_up.user.clone()) {
            let session = Session::new(access_token, sign_up.expires_in.unwrap_or(3600), user);
            let session = match sign_up.refresh_token {
                Some(refresh_token) => session.with_refresh_token(refresh_token),
                None => session,
            };
            return Ok(SignUpOutcome::SignedIn(session));
        }

        if sign_up.user.is_none() && sign_up.id.is_none() {
            return Err(AuthError::Rejected("Sign up returned no user".to_string()));
        }

        let email = sign_up.user
            .and_then(|u| u.email)
            .or(sign_up.email)
            .unwrap_or_else(|| email.to_string());
        Ok(SignUpOutcome::ConfirmationRequired { email })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self.client
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        tracing::info!("Sign out response status: {}", response.status());

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let response = self.client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let user: User = response.json().await?;
        Ok(user)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        tracing::info!("Refreshing session");
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_grant("refresh_token", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_user() -> User {
        User {
            id: Uuid::nil(),
            email: Some("ana@example.com".to_string()),
        }
    }

    fn create_test_session() -> Session {
        Session::new("access".to_string(), 3600, create_user())
    }

    fn create_expired_session() -> Session {
        Session {
            access_token: "expired".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc::now() - chrono::Duration::hours(1),
            token_type: "bearer".to_string(),
            user: create_user(),
        }
    }

    #[test]
    fn new_session_is_valid() {
        assert!(create_test_session().is_valid());
        assert!(!create_test_session().needs_refresh());
    }

    #[test]
    fn expired_session_is_not_valid() {
        let session = create_expired_session();
        assert!(!session.is_valid());
        assert!(session.needs_refresh());
    }

    #[test]
    fn session_close_to_expiry_needs_refresh() {
        let mut session = create_test_session();
        session.expires_at = Utc::now() + chrono::Duration::minutes(3);

        assert!(session.is_valid());
        assert!(session.needs_refresh());
    }

    #[test]
    fn save_and_load_session() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(temp_dir.path().join("nested").join("session.json"));
        let session = create_test_session().with_refresh_token("refresh".to_string());

        storage.save(&session).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, Some(session));
    }

    #[test]
    fn load_missing_session_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(temp_dir.path().join("session.json"));

        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn load_corrupt_session_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(SessionStorage::new(path).load().is_err());
    }

    #[test]
    fn clear_removes_file_and_tolerates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let storage = SessionStorage::new(path.clone());
        storage.save(&create_test_session()).unwrap();

        storage.clear().unwrap();
        storage.clear().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn credentials_require_email_shape() {
        assert!(validate_credentials("ana@example.com", "secret").is_ok());
        assert!(matches!(validate_credentials("", "secret"), Err(AuthError::InvalidInput(_))));
        assert!(matches!(validate_credentials("ana", "secret"), Err(AuthError::InvalidInput(_))));
        assert!(matches!(validate_credentials("ana@example.com", ""), Err(AuthError::InvalidInput(_))));
    }

    #[test]
    fn error_message_prefers_description() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        ).unwrap();

        assert_eq!(body.into_message(), Some("Invalid login credentials".to_string()));
    }

    #[test]
    fn error_message_falls_back_to_msg() {
        let body: ErrorResponse = serde_json::from_str(r#"{"code":422,"msg":"User already registered"}"#).unwrap();

        assert_eq!(body.into_message(), Some("User already registered".to_string()));
    }

    #[test]
    fn auth_client_builds_endpoints_under_auth_v1() {
        let client = SupabaseAuthClient::new("http://localhost:54321/", "anon".to_string());

        assert_eq!(client.endpoint("signup"), "http://localhost:54321/auth/v1/signup");
    }
}
