use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::types::expense::ExpenseUpdate;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(engine)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str, password: &str) {
    let (status, _) = call(
        app,
        Method::POST,
        "/api/register",
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;

    let (status, body) = call(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK"}));
}

#[tokio::test]
async fn register_and_login() {
    let app = app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"username": "alice", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"success": true, "message": "User registered successfully"})
    );

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"username": "alice", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"user_id": 1, "username": "alice"}));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "message": "user not found or incorrect password"})
    );
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = app().await;
    register(&app, "alice", "secret").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"username": "alice", "password": "again"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn empty_username_is_bad_request() {
    let app = app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"username": "", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("username must not be empty"));
}

#[tokio::test]
async fn user_endpoints_never_expose_passwords() {
    let app = app().await;
    register(&app, "alice", "secret").await;
    register(&app, "bob", "hunter2").await;

    let (status, body) = call(&app, Method::GET, "/api/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 2, "username": "bob"}));

    let (status, body) = call(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Users retrieved successfully",
            "data": [
                {"id": 1, "username": "alice"},
                {"id": 2, "username": "bob"}
            ]
        })
    );
}

#[tokio::test]
async fn update_and_delete_user() {
    let app = app().await;
    register(&app, "alice", "secret").await;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(json!({"username": "alicia", "password": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"username": "alicia", "password": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "user not found"}));

    let (status, _) = call(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(json!({"username": "ghost", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expense_lifecycle() {
    let app = app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({"description": "lunch", "amount": "12.50", "category": "Food"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"success": true, "message": "Expense created successfully"})
    );

    let (status, body) = call(&app, Method::GET, "/api/expenses/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["id"], json!(1));
    assert_eq!(data["title"], Value::Null);
    assert_eq!(data["description"], json!("lunch"));
    assert_eq!(data["amount"], json!("12.50"));
    assert_eq!(data["category"], json!("Food"));
    assert_eq!(data["user_id"], Value::Null);
    assert!(data["date"].as_str().is_some_and(|date| date.len() == 10));

    let (status, body) = call(&app, Method::GET, "/api/expenses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, _) = call(&app, Method::DELETE, "/api/expenses/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/api/expenses/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "expense not found"}));
}

#[tokio::test]
async fn expense_update_status_codes() {
    let app = app().await;
    call(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({"title": "Books", "description": "course books", "amount": 30, "category": "Education"})),
    )
    .await;

    let (status, body) = call(&app, Method::PUT, "/api/expenses/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/expenses/1",
        Some(json!({"category": "InvalidX"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("invalid category 'InvalidX': allowed values are Food, Education, Entertainment")
    );

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/expenses/9",
        Some(json!({"category": "Food"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let patch = ExpenseUpdate {
        title: Some(None),
        category: Some("Entertainment".to_string()),
        ..Default::default()
    };
    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/expenses/1",
        Some(serde_json::to_value(&patch).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Expense updated successfully"})
    );

    let (_, body) = call(&app, Method::GET, "/api/expenses/1", None).await;
    assert_eq!(body["data"]["title"], Value::Null);
    assert_eq!(body["data"]["category"], json!("Entertainment"));
    assert_eq!(body["data"]["amount"], json!("30"));
    assert_eq!(body["data"]["description"], json!("course books"));
}

#[tokio::test]
async fn deleting_unknown_expense_is_not_found() {
    let app = app().await;

    let (status, body) = call(&app, Method::DELETE, "/api/expenses/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

fn assert_bad_request_body(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_typed_field_is_a_400_failure_body() {
    let app = app().await;
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({"description": "Lunch", "amount": "12.50", "category": "Food"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        Method::PUT,
        "/api/expenses/1",
        Some(json!({"category": 5})),
    )
    .await;
    assert_bad_request_body(status, &body);

    let (_, body) = call(&app, Method::GET, "/api/expenses/1", None).await;
    assert_eq!(body["data"]["category"], json!("Food"));
}

#[tokio::test]
async fn missing_field_is_a_400_failure_body() {
    let app = app().await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({"description": "Lunch", "amount": "12.50"})),
    )
    .await;
    assert_bad_request_body(status, &body);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"username": "a"})),
    )
    .await;
    assert_bad_request_body(status, &body);

    let (_, body) = call(&app, Method::GET, "/api/expenses", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn unreadable_body_is_a_400_failure_body() {
    let app = app().await;

    let syntax_error = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let no_content_type = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .body(Body::from(
            json!({"username": "alice", "password": "secret"}).to_string(),
        ))
        .unwrap();

    for request in [syntax_error, no_content_type] {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_bad_request_body(status, &body);
    }
}
