use agile_board::sync::task_api::{ApiError, SupabaseTaskClient, TaskApi};
use agile_board::task::{TaskColor, TaskDraft, TaskPatch, TaskStatus};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: Uuid = Uuid::from_u128(0x42);

fn client(server: &MockServer) -> SupabaseTaskClient {
    SupabaseTaskClient::new(&server.uri(), "anon-key".to_string(), "user-token".to_string())
}

#[tokio::test]
async fn fetch_filters_by_owner_and_skips_bad_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("user_id", format!("eq.{}", OWNER)))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "title": "Lab report",
                "status": "doing",
                "due_date": "2024-03-01",
                "start_time": "09:00:00",
                "end_time": "10:30:00",
                "color": "green",
                "user_id": OWNER
            },
            {
                "id": 2,
                "title": "Broken row",
                "status": "archived",
                "user_id": OWNER
            },
            {
                "id": "b7c9",
                "title": "Pay rent",
                "status": "todo",
                "due_date": null,
                "user_id": OWNER
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client(&server).fetch_tasks(OWNER).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "1");
    assert_eq!(tasks[0].status, TaskStatus::Doing);
    assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(tasks[0].start_time, NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(tasks[0].color, Some(TaskColor::Green));
    assert_eq!(tasks[1].id, "b7c9");
    assert_eq!(tasks[1].due_date, None);
}

#[tokio::test]
async fn insert_sends_todo_row_and_returns_stored_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/tasks"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{
            "title": "Essay",
            "user_id": OWNER,
            "status": "todo",
            "due_date": "2024-03-05",
            "start_time": "14:00",
            "end_time": "15:00"
        }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 7,
            "title": "Essay",
            "status": "todo",
            "due_date": "2024-03-05",
            "start_time": "14:00:00",
            "end_time": "15:00:00",
            "user_id": OWNER
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let draft = TaskDraft::new("  Essay ")
        .with_due_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        .with_times(
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0),
        );

    let task = client(&server).insert_task(OWNER, &draft).await.unwrap();

    assert_eq!(task.id, "7");
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.owner, OWNER);
}

#[tokio::test]
async fn update_patches_only_given_columns() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.7"))
        .and(body_json(json!({ "status": "done" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_task("7", &TaskPatch::status(TaskStatus::Done))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_targets_single_row() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/tasks"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_task("7").await.unwrap();
}

#[tokio::test]
async fn rejected_token_is_an_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_tasks(OWNER).await.unwrap_err();

    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn server_errors_carry_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client(&server).delete_task("7").await.unwrap_err();

    match err {
        ApiError::RequestError(message) => assert!(message.contains("database unavailable")),
        other => panic!("unexpected error: {:?}", other),
    }
}
