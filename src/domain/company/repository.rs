use async_trait::async_trait;

use super::{Company, CreateCompanyDto, GetCompanyDto, UpdateCompanyDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait CompanyRepositoryInterface: Send + Sync {
    async fn create_company(&self, dto: CreateCompanyDto) -> DomainResult<Company>;

    async fn list_companies(&self, dto: GetCompanyDto) -> DomainResult<PaginatedResult<Company>>;
    async fn get_company_by_id(&self, id: &str) -> DomainResult<Option<Company>>;
    async fn get_company_by_name(&self, name: &str) -> DomainResult<Option<Company>>;

    async fn update_company(&self, id: &str, dto: UpdateCompanyDto)
        -> DomainResult<Option<Company>>;
    /// Deletes the company and, through the foreign key, its users.
    async fn delete_company(&self, id: &str) -> DomainResult<()>;
}
