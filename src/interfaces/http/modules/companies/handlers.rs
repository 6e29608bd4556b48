//! Company handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Json,
};

use super::dto::{CompanyDto, CompanyForm, ListCompaniesParams};
use crate::application::{Actor, CompanyService};
use crate::interfaces::http::common::{
    api_error, ApiError, ApiResponse, PaginatedResponse, ValidatedForm,
};
use crate::interfaces::http::routes;

#[derive(Clone)]
pub struct CompanyState {
    pub company_service: Arc<CompanyService>,
}

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Companies",
    operation_id = "companies.index",
    security(("bearer_auth" = [])),
    params(ListCompaniesParams),
    responses(
        (status = 200, description = "Company list", body = ApiResponse<PaginatedResponse<CompanyDto>>),
        (status = 403, description = "Global admin required")
    )
)]
pub async fn index(
    State(state): State<CompanyState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListCompaniesParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<CompanyDto>>>, ApiError> {
    let page = state
        .company_service
        .list_companies(&actor, params.into())
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/companies/{company}",
    tag = "Companies",
    operation_id = "companies.show",
    security(("bearer_auth" = [])),
    params(("company" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = ApiResponse<CompanyDto>),
        (status = 403, description = "Not an admin of this company"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn show(
    State(state): State<CompanyState>,
    Extension(actor): Extension<Actor>,
    Path(company_id): Path<String>,
) -> Result<Json<ApiResponse<CompanyDto>>, ApiError> {
    let company = state
        .company_service
        .get_company(&actor, &company_id)
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(company.into())))
}

#[utoipa::path(
    post,
    path = "/companies",
    tag = "Companies",
    operation_id = "companies.store",
    security(("bearer_auth" = [])),
    request_body(content = CompanyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to companies.index"),
        (status = 403, description = "Global admin required"),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn store(
    State(state): State<CompanyState>,
    Extension(actor): Extension<Actor>,
    ValidatedForm(form): ValidatedForm<CompanyForm>,
) -> Result<Redirect, ApiError> {
    state
        .company_service
        .create_company(&actor, &form.name)
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_index()))
}

#[utoipa::path(
    put,
    path = "/companies/{company}",
    tag = "Companies",
    operation_id = "companies.update",
    security(("bearer_auth" = [])),
    params(("company" = String, Path, description = "Company ID")),
    request_body(content = CompanyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Renamed, redirect to companies.index"),
        (status = 403, description = "Global admin required"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update(
    State(state): State<CompanyState>,
    Extension(actor): Extension<Actor>,
    Path(company_id): Path<String>,
    ValidatedForm(form): ValidatedForm<CompanyForm>,
) -> Result<Redirect, ApiError> {
    state
        .company_service
        .rename_company(&actor, &company_id, &form.name)
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_index()))
}

#[utoipa::path(
    delete,
    path = "/companies/{company}",
    tag = "Companies",
    operation_id = "companies.destroy",
    security(("bearer_auth" = [])),
    params(("company" = String, Path, description = "Company ID")),
    responses(
        (status = 303, description = "Deleted with its users, redirect to companies.index"),
        (status = 403, description = "Global admin required"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn destroy(
    State(state): State<CompanyState>,
    Extension(actor): Extension<Actor>,
    Path(company_id): Path<String>,
) -> Result<Redirect, ApiError> {
    state
        .company_service
        .delete_company(&actor, &company_id)
        .await
        .map_err(api_error)?;

    Ok(Redirect::to(&routes::companies_index()))
}
