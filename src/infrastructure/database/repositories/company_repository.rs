use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::domain::{
    Company, CompanyRepositoryInterface, CreateCompanyDto, DomainError, DomainResult,
    GetCompanyDto, UpdateCompanyDto,
};
use crate::infrastructure::database::entities::{company, user};
use crate::shared::{validate_pagination, PaginatedResult};

use super::contains_pattern;

pub struct SeaOrmCompanyRepository {
    db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<company::Model> for Company {
    fn from(model: company::Model) -> Self {
        Company {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict("Company name already exists".to_string())
        }
        _ => DomainError::from(e),
    }
}

#[async_trait]
impl CompanyRepositoryInterface for SeaOrmCompanyRepository {
    async fn create_company(&self, dto: CreateCompanyDto) -> DomainResult<Company> {
        let now = Utc::now();

        let model = company::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(write_err)?;

        Ok(model.into())
    }

    async fn list_companies(&self, dto: GetCompanyDto) -> DomainResult<PaginatedResult<Company>> {
        let (page, page_size) = validate_pagination(dto.page, dto.page_size);

        let mut query = company::Entity::find();
        if let Some(ref search) = dto.search {
            query = query.filter(company::Column::Name.like(contains_pattern(search)));
        }
        query = query
            .order_by_asc(company::Column::Name)
            .order_by_asc(company::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let models = query
            .offset(u64::from(page - 1) * u64::from(page_size))
            .limit(u64::from(page_size))
            .all(&self.db)
            .await?;

        Ok(PaginatedResult::new(
            models.into_iter().map(Company::from).collect(),
            total,
            page,
            page_size,
        ))
    }

    async fn get_company_by_id(&self, id: &str) -> DomainResult<Option<Company>> {
        let model = company::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Company::from))
    }

    async fn get_company_by_name(&self, name: &str) -> DomainResult<Option<Company>> {
        let model = company::Entity::find()
            .filter(company::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Company::from))
    }

    async fn update_company(
        &self,
        id: &str,
        dto: UpdateCompanyDto,
    ) -> DomainResult<Option<Company>> {
        let Some(existing) = company::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: company::ActiveModel = existing.into();
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(Some(updated.into()))
    }

    async fn delete_company(&self, id: &str) -> DomainResult<()> {
        // Members are removed in the same transaction so the result does not
        // depend on the connection having foreign keys enabled.
        let txn = self.db.begin().await?;

        user::Entity::delete_many()
            .filter(user::Column::CompanyId.eq(id))
            .exec(&txn)
            .await?;

        let result = company::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::not_found("Company", id));
        }

        txn.commit().await?;
        Ok(())
    }
}
