//! End-to-end status workflow against a mock task API.

use serde_json::json;
use taskboard::engine::board::{TaskBoard, TransitionOutcome};
use taskboard::engine::client::HttpClient;
use taskboard::engine::config::Config;
use taskboard::engine::store::{TaskFilter, TaskStore};
use taskboard::engine::types::TaskStatus;
use taskboard::engine::views::{kanban_columns, table_rows};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpClient {
    let config = Config::default().with_base_url(&server.uri()).expect("config");
    HttpClient::new(&config).expect("client")
}

fn task_json(id: &str, status: &str, projeto_id: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": "details",
        "status": status,
        "priority": 2,
        "dueDate": "2025-04-01T00:00:00Z",
        "assignedToId": "u2",
        "authorId": "u1",
        "projetoId": projeto_id,
        "createdAt": "2025-01-01T10:00:00Z",
        "updatedAt": "2025-01-02T10:00:00Z"
    })
}

async fn board_with(server: &MockServer, tasks: serde_json::Value) -> TaskBoard {
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
        .mount(server)
        .await;
    let mut board = TaskBoard::default();
    board
        .load(&client(server), &TaskFilter::default())
        .await
        .expect("load");
    board
}

#[tokio::test]
async fn drag_to_new_column_sends_full_record() {
    let server = MockServer::start().await;
    let mut board = board_with(
        &server,
        json!([{ "id": "t1", "status": "PENDENTE", "title": "Draft report", "priority": 1 }]),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/tasks/t1"))
        .and(body_json(json!({
            "title": "Draft report",
            "description": null,
            "status": "EM_ANDAMENTO",
            "priority": 1,
            "dueDate": null,
            "assignedToId": null,
            "authorId": null,
            "projetoId": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "status": "EM_ANDAMENTO", "title": "Draft report", "priority": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let pending = board.begin("t1", TaskStatus::InProgress).expect("real change");
    assert_eq!(board.get("t1").unwrap().status, TaskStatus::InProgress);

    let result = api.update_task(pending.task_id(), pending.payload()).await;
    assert_eq!(board.settle(pending, result), TransitionOutcome::Applied);
    assert_eq!(board.get("t1").unwrap().status, TaskStatus::InProgress);
    assert!(board.error().is_none());

    let columns = kanban_columns(board.tasks());
    assert_eq!(columns[1].tasks.len(), 1);
    assert_eq!(columns[1].tasks[0].id, "t1");
}

#[tokio::test]
async fn drop_on_same_column_sends_nothing() {
    let server = MockServer::start().await;
    let mut board = board_with(&server, json!([task_json("t1", "PENDENTE", None)])).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let before = board.tasks().to_vec();
    let outcome = board
        .transition(&client(&server), "t1", TaskStatus::Pending)
        .await;
    assert_eq!(outcome, TransitionOutcome::Unchanged);
    assert_eq!(board.tasks(), before.as_slice());
}

#[tokio::test]
async fn empty_success_response_keeps_new_status() {
    let server = MockServer::start().await;
    let mut board = board_with(&server, json!([task_json("t1", "PENDENTE", None)])).await;

    Mock::given(method("PUT"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = board
        .transition(&client(&server), "t1", TaskStatus::Done)
        .await;
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(board.get("t1").unwrap().status, TaskStatus::Done);
    assert!(board.error().is_none());
}

#[tokio::test]
async fn server_error_rolls_back_with_message() {
    let server = MockServer::start().await;
    let mut board = board_with(&server, json!([task_json("t2", "EM_ANDAMENTO", Some("p1"))])).await;

    Mock::given(method("PUT"))
        .and(path("/tasks/t2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "validation failed" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = board
        .transition(&client(&server), "t2", TaskStatus::Done)
        .await;

    assert_eq!(
        outcome,
        TransitionOutcome::RolledBack {
            restored: TaskStatus::InProgress,
            message: "validation failed".to_string()
        }
    );
    assert_eq!(board.get("t2").unwrap().status, TaskStatus::InProgress);
    assert_eq!(board.error(), Some("validation failed"));
}

#[tokio::test]
async fn error_without_message_uses_fallback() {
    let server = MockServer::start().await;
    let mut board = board_with(&server, json!([task_json("t3", "PENDENTE", None)])).await;

    Mock::given(method("PUT"))
        .and(path("/tasks/t3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    board
        .transition(&client(&server), "t3", TaskStatus::Done)
        .await;
    assert_eq!(board.get("t3").unwrap().status, TaskStatus::Pending);
    assert_eq!(board.error(), Some(taskboard::engine::error::GENERIC_FAILURE));
}

#[tokio::test]
async fn transport_failure_rolls_back() {
    let task = serde_json::from_value(task_json("t4", "CONCLUIDA", None)).unwrap();
    let mut board = TaskBoard::new(vec![task]);
    let config = Config {
        timeout_secs: Some(5),
        ..Config::default().with_base_url("http://127.0.0.1:1").unwrap()
    };
    let api = HttpClient::new(&config).unwrap();

    let outcome = board.transition(&api, "t4", TaskStatus::Pending).await;
    assert!(matches!(outcome, TransitionOutcome::RolledBack { .. }));
    assert_eq!(board.get("t4").unwrap().status, TaskStatus::Done);
    assert_eq!(board.error(), Some("Could not reach the server."));
}

#[tokio::test]
async fn project_filter_and_reset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("projetoId", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("a", "PENDENTE", Some("p1")),
            task_json("c", "CONCLUIDA", Some("p1")),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param_is_missing("projetoId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("a", "PENDENTE", Some("p1")),
            task_json("b", "EM_ANDAMENTO", Some("p2")),
            task_json("c", "CONCLUIDA", Some("p1")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let mut board = TaskBoard::default();

    board.load(&api, &TaskFilter::project(Some("p1"))).await.unwrap();
    assert!(board
        .tasks()
        .iter()
        .all(|t| t.projeto_id.as_deref() == Some("p1")));
    assert_eq!(board.tasks().len(), 2);

    board.load(&api, &TaskFilter::project(Some(""))).await.unwrap();
    let ids: Vec<_> = board.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(table_rows(board.tasks()).len(), 3);
}

#[tokio::test]
async fn bearer_token_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("Authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        token: Some("s3cret".to_string()),
        ..Config::default().with_base_url(&server.uri()).unwrap()
    };
    let api = HttpClient::new(&config).unwrap();
    assert!(api.list_tasks(&TaskFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_task_locally() {
    let server = MockServer::start().await;
    let mut board = board_with(
        &server,
        json!([task_json("a", "PENDENTE", None), task_json("b", "PENDENTE", None)]),
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/a"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    board.remove(&client(&server), "a").await.unwrap();
    let ids: Vec<_> = board.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["b"]);
}
