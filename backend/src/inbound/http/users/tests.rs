//! Tests for users API handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{FixtureConnectivityProbe, MockUsersCommand, MockUsersQuery};
use crate::domain::{Error as DomainError, HealthService};
use crate::inbound::http::test_utils::{in_memory_state, users_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(users_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn create_request(body: &Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user_in_envelope() {
    let (status, body) = send(
        in_memory_state(),
        create_request(&json!({"name": "John Doe", "email": "john@example.com", "age": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["age"], 30);
    assert_eq!(body["data"]["created_at"], body["data"]["updated_at"]);
}

#[rstest]
#[actix_web::test]
async fn create_decodes_body_without_content_type() {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_payload(r#"{"name": "John Doe", "email": "john@example.com", "age": 30}"#);

    let (status, body) = send(in_memory_state(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "john@example.com");
}

#[rstest]
#[case(json!({"email": "john@example.com", "age": 30}), "name is required")]
#[case(json!({"name": "J", "email": "john@example.com", "age": 30}), "name must be between 2 and 100 characters")]
#[case(json!({"name": "John", "email": "nope", "age": 30}), "invalid email format")]
#[case(json!({"name": "John", "email": "john@example.com"}), "age must be between 1 and 150")]
#[actix_web::test]
async fn create_rejects_invalid_fields(#[case] payload: Value, #[case] message: &str) {
    let (status, body) = send(in_memory_state(), create_request(&payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], message);
    assert_eq!(body["code"], 400);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_rejected_with_envelope() {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");

    let (status, body) = send(in_memory_state(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON payload");
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_bad_request() {
    let state = in_memory_state();
    let app = actix_test::init_service(users_app(state)).await;
    let payload = json!({"name": "John Doe", "email": "john@example.com", "age": 30});

    let first = actix_test::call_service(&app, create_request(&payload).to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = actix_test::call_service(&app, create_request(&payload).to_request()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "user with email john@example.com already exists");
}

#[rstest]
#[actix_web::test]
async fn get_unknown_id_is_not_found() {
    let (status, body) = send(
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users/99"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "User not found");
}

#[rstest]
#[actix_web::test]
async fn zero_id_is_rejected_before_lookup() {
    let (status, body) = send(
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users/0"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid user ID");
}

#[rstest]
#[actix_web::test]
async fn unparsable_id_is_invalid() {
    let (status, body) = send(
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users/99999999999999999999"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid user ID");
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::put().set_json(json!({ "age": 31 })))]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn id_beyond_storage_range_is_not_found(#[case] request: actix_test::TestRequest) {
    let (status, body) = send(
        in_memory_state(),
        request.uri("/api/v1/users/2147483648"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_does_not_match_route() {
    let (status, _) = send(
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users/abc"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_normalises_paging_and_reports_total() {
    let app = actix_test::init_service(users_app(in_memory_state())).await;
    for (name, email) in [("Ada", "ada@example.com"), ("Grace", "grace@example.com")] {
        let payload = json!({"name": name, "email": email, "age": 36});
        actix_test::call_service(&app, create_request(&payload).to_request()).await;
    }

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users?page=0&limit=500")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["message"], "Users retrieved successfully");
    assert_eq!(
        body["data"]["pagination"],
        json!({"total": 2, "page": 1, "limit": 10})
    );
    assert_eq!(body["data"]["users"][0]["name"], "Grace");
}

#[rstest]
#[actix_web::test]
async fn list_treats_garbage_paging_as_absent() {
    let (status, body) = send(
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users?page=abc&limit=xyz"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 10);
    assert_eq!(body["data"]["users"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn update_changes_only_present_fields() {
    let app = actix_test::init_service(users_app(in_memory_state())).await;
    let payload = json!({"name": "John Doe", "email": "john@example.com", "age": 30});
    actix_test::call_service(&app, create_request(&payload).to_request()).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/users/1")
        .set_json(json!({"age": 31}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["age"], 31);
    assert_eq!(body["data"]["name"], "John Doe");
    assert_eq!(body["data"]["email"], "john@example.com");
}

#[rstest]
#[actix_web::test]
async fn update_rejects_explicit_empty_name() {
    let app = actix_test::init_service(users_app(in_memory_state())).await;
    let payload = json!({"name": "John Doe", "email": "john@example.com", "age": 30});
    actix_test::call_service(&app, create_request(&payload).to_request()).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/users/1")
        .set_json(json!({"name": ""}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_reports_not_found() {
    let app = actix_test::init_service(users_app(in_memory_state())).await;
    let payload = json!({"name": "John Doe", "email": "john@example.com", "age": 30});
    actix_test::call_service(&app, create_request(&payload).to_request()).await;

    let delete = actix_test::TestRequest::delete()
        .uri("/api/v1/users/1")
        .to_request();
    let response = actix_test::call_service(&app, delete).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": "User deleted successfully"}));

    let again = actix_test::TestRequest::delete()
        .uri("/api/v1/users/1")
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, again).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockUsersQuery::new();
    query
        .expect_get_user()
        .returning(|_| Err(DomainError::internal("user repository error: socket closed")));
    let command = MockUsersCommand::new();
    let state = HttpState::new(
        Arc::new(query),
        Arc::new(command),
        HealthService::new(Arc::new(FixtureConnectivityProbe)),
    );

    let (status, body) = send(state, actix_test::TestRequest::get().uri("/api/v1/users/1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "Internal server error");
}
