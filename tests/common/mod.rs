#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use tenant_admin::config::AppConfig;
use tenant_admin::domain::{Company, CreateCompanyDto, CreateUserDto, RepositoryProvider, User, UserRole};
use tenant_admin::infrastructure::crypto::jwt::{create_token, JwtConfig};
use tenant_admin::infrastructure::crypto::password::{hash_password, MIN_COST};
use tenant_admin::infrastructure::database::migrator::Migrator;
use tenant_admin::server::build_services;
use tenant_admin::{create_api_router, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub const PASSWORD: &str = "password";

/// `/companies/{company}`
pub fn company_path(company_id: &str) -> String {
    format!("/companies/{}", company_id)
}

/// `/companies/{company}/users/{user}`
pub fn company_user_path(company_id: &str, user_id: &str) -> String {
    format!("/companies/{}/users/{}", company_id, user_id)
}

pub struct TestApp {
    pub router: Router,
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt: JwtConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = MIN_COST;

        let db = init_database(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None).await.expect("Failed to migrate");

        let services = build_services(db.clone(), &config);
        let jwt = services.user_service.jwt_config().clone();
        let router = create_api_router(services, None);
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));

        Self { router, repos, jwt }
    }

    pub async fn company(&self, name: &str) -> Company {
        self.repos
            .companies()
            .create_company(CreateCompanyDto {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn user(&self, email: &str, role: UserRole, company: Option<&Company>) -> User {
        self.repos
            .users()
            .create_user(CreateUserDto {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                password_hash: hash_password(PASSWORD, MIN_COST).unwrap(),
                role,
                company_id: company.map(|c| c.id.clone()),
            })
            .await
            .unwrap()
    }

    /// A global admin (no company) and its bearer token.
    pub async fn global_admin(&self) -> (User, String) {
        let admin = self.user("root@example.com", UserRole::Admin, None).await;
        let token = self.token_for(&admin);
        (admin, token)
    }

    pub fn token_for(&self, user: &User) -> String {
        create_token(
            &user.id,
            &user.email,
            user.role.as_str(),
            user.company_id.as_deref(),
            &self.jwt,
        )
        .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn form(&self, method: Method, uri: &str, token: &str, body: &str) -> Response {
        self.send(request(method, uri, Some(token), Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.send(request(Method::DELETE, uri, Some(token), None)).await
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match form {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
