use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GetUserDto, UpdateUserDto, User,
    UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::user;
use crate::shared::{validate_pagination, PaginatedResult};

use super::contains_pattern;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

impl From<user::UserRole> for UserRole {
    fn from(role: user::UserRole) -> Self {
        match role {
            user::UserRole::Admin => UserRole::Admin,
            user::UserRole::User => UserRole::User,
        }
    }
}

impl From<UserRole> for user::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => user::UserRole::Admin,
            UserRole::User => user::UserRole::User,
        }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role.into(),
            company_id: model.company_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_login_at: model.last_login_at,
        }
    }
}

fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict("Email already exists".to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Validation("company_id: company does not exist".to_string())
        }
        _ => DomainError::from(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(dto.role.into()),
            company_id: Set(dto.company_id),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let model = new_user.insert(&self.db).await.map_err(write_err)?;
        Ok(model.into())
    }

    async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        let (page, page_size) = validate_pagination(dto.page, dto.page_size);

        let mut query = user::Entity::find();

        if let Some(ref company_id) = dto.company_id {
            query = query.filter(user::Column::CompanyId.eq(company_id.as_str()));
        }

        // Apply search filter (name or email)
        if let Some(ref search) = dto.search {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Name.like(contains_pattern(search)))
                    .add(user::Column::Email.like(contains_pattern(search))),
            );
        }

        query = match dto.sort_by.as_deref() {
            Some("name") => query.order_by_asc(user::Column::Name),
            Some("email") => query.order_by_asc(user::Column::Email),
            _ => query.order_by_desc(user::Column::CreatedAt),
        };
        query = query.order_by_asc(user::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let offset = u64::from(page - 1) * u64::from(page_size);
        let models = query
            .offset(offset)
            .limit(u64::from(page_size))
            .all(&self.db)
            .await?;

        let items: Vec<User> = models.into_iter().map(User::from).collect();

        Ok(PaginatedResult::new(items, total, page, page_size))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn get_company_user(&self, company_id: &str, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = dto.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = dto.role {
            active.role = Set(role.into());
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;

        Ok(Some(updated.into()))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        user::Entity::update_many()
            .filter(user::Column::Id.eq(id))
            .col_expr(user::Column::LastLoginAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        Ok(())
    }
}
