use std::sync::Arc;

use agile_board::app::{Action, AppState, Tab};
use agile_board::controller::{self, Flow};
use agile_board::gate::Route;
use agile_board::storage::config::Config;
use agile_board::sync::auth_session::AuthSession;
use agile_board::sync::supabase_auth::{SessionStorage, SupabaseAuthClient};
use agile_board::sync::sync_engine::SyncEngine;
use agile_board::task::TaskStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: Uuid = Uuid::from_u128(0x42);

struct Harness {
    _dir: TempDir,
    auth: Arc<AuthSession>,
    engine: SyncEngine,
}

fn harness(server: &MockServer) -> Harness {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.supabase.url = server.uri();
    config.supabase.anon_key = "anon-key".to_string();
    config.supabase.session_cache = dir.path().join("session.json");

    let client = SupabaseAuthClient::new(&config.supabase.url, config.supabase.anon_key.clone());
    let storage = SessionStorage::new(config.supabase.session_cache.clone());
    let auth = Arc::new(AuthSession::new(Arc::new(client), storage));
    let engine = SyncEngine::new(config, Arc::clone(&auth));

    Harness { _dir: dir, auth, engine }
}

async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": { "id": USER_ID, "email": "ana@example.com" }
        })))
        .mount(server)
        .await;
}

async fn mount_tasks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("user_id", format!("eq.{}", USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Lab report", "status": "todo", "due_date": "2024-03-01", "user_id": USER_ID },
            { "id": 2, "title": "Pay rent", "status": "done", "user_id": USER_ID }
        ])))
        .mount(server)
        .await;
}

fn login_app() -> AppState {
    let mut app = AppState::new();
    app.gate.navigate(Route::Login);
    app.login_form.email = "ana@example.com".to_string();
    app.login_form.password = "secret".to_string();
    app
}

#[tokio::test]
async fn signing_in_opens_board_with_users_tasks() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_tasks(&server).await;
    let h = harness(&server);
    let mut app = login_app();

    let flow = controller::apply(&mut app, Action::SubmitLogin, &h.engine, &h.auth).await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(app.route(), Route::Dashboard);
    assert_eq!(app.tasks.len(), 2);
    assert_eq!(app.tasks.counts().get(TaskStatus::Done), 1);
}

#[tokio::test]
async fn moving_a_task_patches_its_status() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_tasks(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.1"))
        .and(body_json(json!({ "status": "doing" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let h = harness(&server);
    let mut app = login_app();
    controller::apply(&mut app, Action::SubmitLogin, &h.engine, &h.auth).await;

    let action = Action::MoveTask { task_id: "1".to_string(), status: TaskStatus::Doing };
    controller::apply(&mut app, action, &h.engine, &h.auth).await;

    assert_eq!(app.tasks.get("1").map(|t| t.status), Some(TaskStatus::Doing));
}

#[tokio::test]
async fn expired_token_sends_user_back_to_login() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let h = harness(&server);
    let mut app = login_app();

    controller::apply(&mut app, Action::SubmitLogin, &h.engine, &h.auth).await;

    assert_eq!(app.route(), Route::Login);
    assert!(h.auth.current().is_none());
    assert!(app.tasks.is_empty());
}

#[tokio::test]
async fn logging_out_clears_session_and_board() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_tasks(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": USER_ID, "email": "ana@example.com" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let h = harness(&server);
    let mut app = login_app();
    controller::apply(&mut app, Action::SubmitLogin, &h.engine, &h.auth).await;
    controller::apply(&mut app, Action::SwitchTab(Tab::Profile), &h.engine, &h.auth).await;
    assert_eq!(app.profile.as_ref().map(|p| p.email.as_str()), Some("ana@example.com"));

    controller::apply(&mut app, Action::Logout, &h.engine, &h.auth).await;

    assert_eq!(app.route(), Route::Login);
    assert!(app.profile.is_none());
    assert!(h.auth.current().is_none());
}
