//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CompanyService, UserService};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, companies, company_users, health};

/// Everything the HTTP layer needs. Handlers extract their own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct AppServices {
    pub user_service: Arc<UserService>,
    pub company_service: Arc<CompanyService>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

impl AppServices {
    pub fn new(
        user_service: Arc<UserService>,
        company_service: Arc<CompanyService>,
        db: DatabaseConnection,
    ) -> Self {
        Self {
            user_service,
            company_service,
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppServices> for company_users::CompanyUserState {
    fn from_ref(s: &AppServices) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppServices> for companies::CompanyState {
    fn from_ref(s: &AppServices) -> Self {
        Self {
            company_service: Arc::clone(&s.company_service),
        }
    }
}

impl FromRef<AppServices> for auth::AuthHandlerState {
    fn from_ref(s: &AppServices) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppServices> for health::HealthState {
    fn from_ref(s: &AppServices) -> Self {
        Self {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppServices> for AuthState {
    fn from_ref(s: &AppServices) -> Self {
        Self {
            jwt_config: s.user_service.jwt_config().clone(),
            user_service: Arc::clone(&s.user_service),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        // Companies
        companies::index,
        companies::show,
        companies::store,
        companies::update,
        companies::destroy,
        // Company users
        company_users::index,
        company_users::show,
        company_users::store,
        company_users::update,
        company_users::destroy,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            companies::CompanyDto,
            companies::CompanyForm,
            company_users::UserDto,
            company_users::CreateUserForm,
            company_users::UpdateUserForm,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "JWT login and current actor"),
        (name = "Companies", description = "Tenant lifecycle, global admins only"),
        (name = "Company Users", description = "Admin CRUD on the users of one company"),
    ),
    info(
        title = "Tenant Admin API",
        version = "1.0.0",
        description = "Multi-tenant user administration: companies and their users",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(services: AppServices, prometheus: Option<PrometheusHandle>) -> Router {
    let auth_layer = middleware::from_fn_with_state(AuthState::from_ref(&services), auth_middleware);

    // companies.* and companies.users.*
    let company_routes = Router::new()
        .route("/companies", get(companies::index).post(companies::store))
        .route(
            "/companies/{company}",
            get(companies::show)
                .put(companies::update)
                .delete(companies::destroy),
        )
        .route(
            "/companies/{company}/users",
            get(company_users::index).post(company_users::store),
        )
        .route(
            "/companies/{company}/users/{user}",
            get(company_users::show)
                .put(company_users::update)
                .delete(company_users::destroy),
        )
        .route_layer(auth_layer.clone())
        .with_state(services.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::get_current_user))
        .route_layer(auth_layer);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        .with_state(services.clone());

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .with_state(services)
        .merge(auth_routes)
        .merge(auth_protected_routes)
        .merge(company_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
