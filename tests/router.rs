//! Requests that are answered before the store is touched, plus the
//! store-failure path, exercised against a disconnected connection.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use axum_shop_api::{routes::create_app, state::AppState};
use http_body_util::BodyExt;
use rstest::rstest;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState {
        orm: DatabaseConnection::Disconnected,
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_always_ok() {
    let (status, body) = send(
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Route /api/unknown not found");
}

#[rstest]
#[case("GET", "/api/customers/42")]
#[case("PUT", "/api/categories/not-an-id")]
#[case("DELETE", "/api/items/deadbeef")]
#[case("GET", "/api/orders/123e4567")]
#[tokio::test]
async fn malformed_ids_are_not_found(#[case] method: &str, #[case] uri: &str) {
    let (status, body) = send(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;

    let raw = uri.rsplit('/').next().unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], format!("Resource not found with id of {raw}"));
}

#[tokio::test]
async fn unparseable_body_is_bad_request() {
    let (status, body) = send(
        Request::builder()
            .method("POST")
            .uri("/api/customers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_customer_fields_are_listed() {
    let (status, body) = send(post_json("/api/customers", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!(["Name is required", "Surname is required", "Email is required"])
    );
}

#[rstest]
#[case("john.doe")]
#[case("jöhn@exämple.com")]
#[tokio::test]
async fn invalid_email_is_rejected(#[case] email: &str) {
    let (status, body) = send(post_json(
        "/api/customers",
        json!({ "name": "John", "surname": "Doe", "email": email }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Please add a valid email"]));
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let (status, body) = send(post_json(
        "/api/items",
        json!({ "title": "Mug", "description": "Ceramic", "price": -5.0 }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Price cannot be negative"]));
}

#[tokio::test]
async fn malformed_category_id_is_not_found() {
    let (status, body) = send(post_json(
        "/api/items",
        json!({
            "title": "Mug",
            "description": "Ceramic",
            "price": 5.0,
            "categories": ["kitchen"]
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found with id of kitchen");
}

#[tokio::test]
async fn order_without_customer_is_rejected() {
    let (status, body) = send(post_json(
        "/api/orders",
        json!({ "items": [{ "shopItem": "deadbeef", "quantity": 1 }] }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Customer is required"]));
}

#[tokio::test]
async fn unknown_order_status_is_rejected() {
    let (status, body) = send(post_json(
        "/api/orders",
        json!({ "customer": "c1", "items": [], "status": "lost" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn store_failures_are_server_errors() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/customers")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}
