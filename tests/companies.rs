mod common;

use axum::http::{Method, StatusCode};

use common::{company_path, json_body, location, TestApp};
use tenant_admin::domain::UserRole;
use tenant_admin::interfaces::http::routes;

#[tokio::test]
async fn global_admin_manages_company_lifecycle() {
    let app = TestApp::spawn().await;
    let (_, token) = app.global_admin().await;

    let response = app
        .form(Method::POST, &routes::companies_index(), &token, "name=Acme+Corp")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), routes::companies_index());

    let company = app
        .repos
        .companies()
        .get_company_by_name("Acme Corp")
        .await
        .unwrap()
        .expect("company persisted");

    let body = json_body(app.get(&routes::companies_index(), Some(&token)).await).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Acme Corp");

    let response = app
        .form(Method::PUT, &company_path(&company.id), &token, "name=Acme+Holdings")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.get(&company_path(&company.id), Some(&token)).await).await;
    assert_eq!(body["data"]["name"], "Acme Holdings");
}

#[tokio::test]
async fn duplicate_company_name_is_a_conflict() {
    let app = TestApp::spawn().await;
    let (_, token) = app.global_admin().await;
    app.company("Acme").await;

    let response = app
        .form(Method::POST, &routes::companies_index(), &token, "name=Acme")
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .form(Method::POST, &routes::companies_index(), &token, "name=")
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_a_company_removes_its_users() {
    let app = TestApp::spawn().await;
    let (_, token) = app.global_admin().await;
    let acme = app.company("Acme").await;
    let member = app.user("member@acme.test", UserRole::User, Some(&acme)).await;

    let response = app.delete(&company_path(&acme.id), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), routes::companies_index());

    assert!(app
        .repos
        .companies()
        .get_company_by_id(&acme.id)
        .await
        .unwrap()
        .is_none());
    assert!(app
        .repos
        .users()
        .get_user_by_id(&member.id)
        .await
        .unwrap()
        .is_none());

    let response = app.delete(&company_path(&acme.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn company_admin_reads_only_its_own_company() {
    let app = TestApp::spawn().await;
    let acme = app.company("Acme").await;
    let globex = app.company("Globex").await;
    let admin = app.user("admin@acme.test", UserRole::Admin, Some(&acme)).await;
    let token = app.token_for(&admin);

    assert_eq!(
        app.get(&company_path(&acme.id), Some(&token))
            .await
            .status(),
        StatusCode::OK
    );
    assert_eq!(
        app.get(&company_path(&globex.id), Some(&token))
            .await
            .status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        app.get(&routes::companies_index(), Some(&token)).await.status(),
        StatusCode::FORBIDDEN
    );

    let response = app
        .form(Method::POST, &routes::companies_index(), &token, "name=Initech")
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .form(Method::PUT, &company_path(&acme.id), &token, "name=Mine")
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.delete(&company_path(&acme.id), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn company_search_treats_wildcards_literally() {
    let app = TestApp::spawn().await;
    let (_, token) = app.global_admin().await;
    app.company("100% Pure").await;
    app.company("100X Pure").await;

    let uri = format!("{}?search=100%25", routes::companies_index());
    let body = json_body(app.get(&uri, Some(&token)).await).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "100% Pure");
}
