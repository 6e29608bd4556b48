//! Company service
//!
//! Creating, renaming and deleting companies is reserved to global admins.
//! A company-bound admin may only look at its own company.

use std::sync::Arc;

use tracing::info;

use crate::application::identity::{ensure_company_admin, ensure_global_admin, Actor};
use crate::domain::{
    Company, CreateCompanyDto, DomainError, DomainResult, GetCompanyDto, RepositoryProvider,
    UpdateCompanyDto,
};
use crate::shared::PaginatedResult;

pub struct CompanyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CompanyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_companies(
        &self,
        actor: &Actor,
        query: GetCompanyDto,
    ) -> DomainResult<PaginatedResult<Company>> {
        ensure_global_admin(actor)?;
        self.repos.companies().list_companies(query).await
    }

    pub async fn get_company(&self, actor: &Actor, id: &str) -> DomainResult<Company> {
        ensure_company_admin(actor, id)?;
        self.repos
            .companies()
            .get_company_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company", id))
    }

    pub async fn create_company(&self, actor: &Actor, name: &str) -> DomainResult<Company> {
        ensure_global_admin(actor)?;

        let name = normalize_name(name)?;
        self.ensure_name_free(&name, None).await?;

        let company = self
            .repos
            .companies()
            .create_company(CreateCompanyDto { name })
            .await?;

        info!(actor = %actor.user_id, company_id = %company.id, "Company created");
        Ok(company)
    }

    pub async fn rename_company(
        &self,
        actor: &Actor,
        id: &str,
        name: &str,
    ) -> DomainResult<Company> {
        ensure_global_admin(actor)?;

        let name = normalize_name(name)?;
        self.ensure_name_free(&name, Some(id)).await?;

        let company = self
            .repos
            .companies()
            .update_company(id, UpdateCompanyDto { name: Some(name) })
            .await?
            .ok_or_else(|| DomainError::not_found("Company", id))?;

        info!(actor = %actor.user_id, company_id = id, "Company renamed");
        Ok(company)
    }

    /// Delete a company together with all of its users.
    pub async fn delete_company(&self, actor: &Actor, id: &str) -> DomainResult<()> {
        ensure_global_admin(actor)?;
        self.repos.companies().delete_company(id).await?;

        info!(actor = %actor.user_id, company_id = id, "Company deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, owner: Option<&str>) -> DomainResult<()> {
        match self.repos.companies().get_company_by_name(name).await? {
            Some(existing) if Some(existing.id.as_str()) != owner => Err(DomainError::Conflict(
                format!("Company '{}' already exists", name),
            )),
            _ => Ok(()),
        }
    }
}

fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name: name is required".into()));
    }
    Ok(name.to_string())
}
