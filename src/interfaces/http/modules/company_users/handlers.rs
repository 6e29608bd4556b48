//! Company user handlers
//!
//! Admin-only CRUD on the users of one company. Writes answer with a
//! `303 See Other` back to `companies.users.index`.
//! Delegates to `UserService` from the application/identity layer.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Json,
};

use super::dto::{CreateUserForm, ListUsersParams, UpdateUserForm, UserDto};
use crate::application::{Actor, CompanyUserChanges, NewCompanyUser, UserService};
use crate::domain::{DomainResult, UserRole};
use crate::interfaces::http::common::{
    api_error, ApiError, ApiResponse, PaginatedResponse, ValidatedForm,
};
use crate::interfaces::http::routes;

#[derive(Clone)]
pub struct CompanyUserState {
    pub user_service: Arc<UserService>,
}

/// A blank `role` field counts as absent.
fn parse_role(role: Option<&str>) -> DomainResult<Option<UserRole>> {
    role.filter(|r| !r.trim().is_empty())
        .map(UserRole::from_str)
        .transpose()
}

#[utoipa::path(
    get,
    path = "/companies/{company}/users",
    tag = "Company Users",
    operation_id = "companies.users.index",
    security(("bearer_auth" = [])),
    params(("company" = String, Path, description = "Company ID"), ListUsersParams),
    responses(
        (status = 200, description = "Users of the company", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn index(
    State(state): State<CompanyUserState>,
    Extension(actor): Extension<Actor>,
    Path(company_id): Path<String>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<UserDto>>>, ApiError> {
    let page = state
        .user_service
        .list_company_users(&actor, &company_id, params.into())
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/companies/{company}/users/{user}",
    tag = "Company Users",
    operation_id = "companies.users.show",
    security(("bearer_auth" = [])),
    params(
        ("company" = String, Path, description = "Company ID"),
        ("user" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company or user not found")
    )
)]
pub async fn show(
    State(state): State<CompanyUserState>,
    Extension(actor): Extension<Actor>,
    Path((company_id, user_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state
        .user_service
        .get_company_user(&actor, &company_id, &user_id)
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    post,
    path = "/companies/{company}/users",
    tag = "Company Users",
    operation_id = "companies.users.store",
    security(("bearer_auth" = [])),
    params(("company" = String, Path, description = "Company ID")),
    request_body(content = CreateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to companies.users.index"),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn store(
    State(state): State<CompanyUserState>,
    Extension(actor): Extension<Actor>,
    Path(company_id): Path<String>,
    ValidatedForm(form): ValidatedForm<CreateUserForm>,
) -> Result<Redirect, ApiError> {
    let role = parse_role(form.role.as_deref())
        .map_err(api_error)?
        .unwrap_or_default();

    state
        .user_service
        .create_company_user(
            &actor,
            &company_id,
            NewCompanyUser {
                name: form.name,
                email: form.email,
                password: form.password,
                role,
            },
        )
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_users_index(&company_id)))
}

#[utoipa::path(
    put,
    path = "/companies/{company}/users/{user}",
    tag = "Company Users",
    operation_id = "companies.users.update",
    security(("bearer_auth" = [])),
    params(
        ("company" = String, Path, description = "Company ID"),
        ("user" = String, Path, description = "User ID")
    ),
    request_body(content = UpdateUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to companies.users.index"),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company or user not found"),
        (status = 409, description = "Email already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update(
    State(state): State<CompanyUserState>,
    Extension(actor): Extension<Actor>,
    Path((company_id, user_id)): Path<(String, String)>,
    ValidatedForm(form): ValidatedForm<UpdateUserForm>,
) -> Result<Redirect, ApiError> {
    let role = parse_role(form.role.as_deref()).map_err(api_error)?;

    state
        .user_service
        .update_company_user(
            &actor,
            &company_id,
            &user_id,
            CompanyUserChanges {
                name: Some(form.name),
                email: Some(form.email),
                password: form.password,
                role,
            },
        )
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_users_index(&company_id)))
}

#[utoipa::path(
    delete,
    path = "/companies/{company}/users/{user}",
    tag = "Company Users",
    operation_id = "companies.users.destroy",
    security(("bearer_auth" = [])),
    params(
        ("company" = String, Path, description = "Company ID"),
        ("user" = String, Path, description = "User ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to companies.users.index"),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company or user not found"),
        (status = 422, description = "Attempt to delete own account")
    )
)]
pub async fn destroy(
    State(state): State<CompanyUserState>,
    Extension(actor): Extension<Actor>,
    Path((company_id, user_id)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    state
        .user_service
        .delete_company_user(&actor, &company_id, &user_id)
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_users_index(&company_id)))
}
