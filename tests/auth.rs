mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

use common::{json_body, TestApp, PASSWORD};
use tenant_admin::domain::UserRole;
use tenant_admin::interfaces::http::routes;

fn login_request(email: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({ "email": email, "password": password });
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn login_issues_a_usable_token() {
    let app = TestApp::spawn().await;
    let company = app.company("Acme").await;
    let admin = app.user("admin@acme.test", UserRole::Admin, Some(&company)).await;

    let response = app.send(login_request("ADMIN@acme.test", PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["company_id"], company.id);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let me = json_body(app.get("/api/v1/auth/me", Some(&token)).await).await;
    assert_eq!(me["data"]["id"], admin.id);
    assert_eq!(me["data"]["role"], "admin");

    let response = app
        .get(&routes::companies_users_index(&company.id), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let reloaded = app
        .repos
        .users()
        .get_user_by_id(&admin.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.last_login_at.is_some());
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let app = TestApp::spawn().await;
    app.user("user@test.com", UserRole::User, None).await;

    let response = app.send(login_request("user@test.com", "wrong-password")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(login_request("nobody@test.com", PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(login_request("not-an-email", PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::spawn().await;
    let response = app.get("/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_docs_are_public() {
    let app = TestApp::spawn().await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");

    let response = app.get("/api-doc/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/companies/{company}/users"].is_object());
}
