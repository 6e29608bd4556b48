//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use super::access::{ensure_company_admin, Actor};
use super::commands::{CompanyUserChanges, NewCompanyUser};
use crate::domain::{
    Company, CreateUserDto, DomainError, DomainResult, GetUserDto, RepositoryProvider,
    UpdateUserDto, User, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::PaginatedResult;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// User service: orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    password_cost: u32,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, password_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            password_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let user = match self.repos.users().get_user_by_email(&email).await? {
            Some(user) if verify_password(password, &user.password_hash).unwrap_or(false) => user,
            _ => {
                metrics::counter!("auth_login_failures_total").increment(1);
                return Err(DomainError::Unauthorized("Invalid credentials".into()));
            }
        };

        let token = create_token(
            &user.id,
            &user.email,
            user.role.as_str(),
            user.company_id.as_deref(),
            &self.jwt_config,
        )
        .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        self.repos.users().record_login(&user.id).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Turn verified token claims into the current actor.
    ///
    /// The account is re-read so deletions and role changes apply to
    /// tokens issued before them.
    pub async fn resolve_actor(&self, claims: &TokenClaims) -> DomainResult<Actor> {
        let user = self
            .repos
            .users()
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Account no longer exists".into()))?;

        Ok(Actor::from(user))
    }

    // ── Company-scoped queries ──────────────────────────────────

    /// List the members of a company.
    pub async fn list_company_users(
        &self,
        actor: &Actor,
        company_id: &str,
        mut query: GetUserDto,
    ) -> DomainResult<PaginatedResult<User>> {
        ensure_company_admin(actor, company_id)?;
        self.require_company(company_id).await?;

        query.company_id = Some(company_id.to_string());
        self.repos.users().list_users(query).await
    }

    /// Fetch one member of a company. Users of other companies are
    /// reported as not found.
    pub async fn get_company_user(
        &self,
        actor: &Actor,
        company_id: &str,
        user_id: &str,
    ) -> DomainResult<User> {
        ensure_company_admin(actor, company_id)?;
        self.require_company(company_id).await?;
        self.require_member(company_id, user_id).await
    }

    // ── Company-scoped commands ─────────────────────────────────

    pub async fn create_company_user(
        &self,
        actor: &Actor,
        company_id: &str,
        input: NewCompanyUser,
    ) -> DomainResult<User> {
        ensure_company_admin(actor, company_id)?;
        self.require_company(company_id).await?;

        let name = normalize_name(&input.name)?;
        let email = normalize_email(&input.email);
        self.ensure_email_free(&email, None).await?;

        let password_hash = self.hash(&input.password)?;

        let user = self
            .repos
            .users()
            .create_user(CreateUserDto {
                name,
                email,
                password_hash,
                role: input.role,
                company_id: Some(company_id.to_string()),
            })
            .await?;

        metrics::counter!("company_users_created_total").increment(1);
        info!(
            actor = %actor.user_id,
            company_id,
            user_id = %user.id,
            "Company user created"
        );
        Ok(user)
    }

    pub async fn update_company_user(
        &self,
        actor: &Actor,
        company_id: &str,
        user_id: &str,
        changes: CompanyUserChanges,
    ) -> DomainResult<User> {
        ensure_company_admin(actor, company_id)?;
        self.require_company(company_id).await?;
        self.require_member(company_id, user_id).await?;

        let name = changes.name.as_deref().map(normalize_name).transpose()?;
        let email = changes.email.as_deref().map(normalize_email);
        if let Some(ref email) = email {
            self.ensure_email_free(email, Some(user_id)).await?;
        }
        let password_hash = changes
            .password
            .as_deref()
            .map(|p| self.hash(p))
            .transpose()?;

        let updated = self
            .repos
            .users()
            .update_user(
                user_id,
                UpdateUserDto {
                    name,
                    email,
                    password_hash,
                    role: changes.role,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        info!(actor = %actor.user_id, company_id, user_id, "Company user updated");
        Ok(updated)
    }

    pub async fn delete_company_user(
        &self,
        actor: &Actor,
        company_id: &str,
        user_id: &str,
    ) -> DomainResult<()> {
        ensure_company_admin(actor, company_id)?;
        self.require_company(company_id).await?;
        self.require_member(company_id, user_id).await?;

        if actor.user_id == user_id {
            return Err(DomainError::Validation(
                "You cannot delete your own account".into(),
            ));
        }

        self.repos.users().delete_user(user_id).await?;
        metrics::counter!("company_users_deleted_total").increment(1);

        info!(actor = %actor.user_id, company_id, user_id, "Company user deleted");
        Ok(())
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create a global admin when the users table is empty.
    ///
    /// Returns the created account, or `None` when users already exist.
    pub async fn bootstrap_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count_users().await? > 0 {
            return Ok(None);
        }

        let user = self
            .repos
            .users()
            .create_user(CreateUserDto {
                name: normalize_name(name)?,
                email: normalize_email(email),
                password_hash: self.hash(password)?,
                role: UserRole::Admin,
                company_id: None,
            })
            .await?;

        info!(email = %user.email, "Default admin created");
        warn!("Please change the default admin password immediately");
        Ok(Some(user))
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn require_company(&self, company_id: &str) -> DomainResult<Company> {
        self.repos
            .companies()
            .get_company_by_id(company_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company", company_id))
    }

    async fn require_member(&self, company_id: &str, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .get_company_user(company_id, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<&str>) -> DomainResult<()> {
        match self.repos.users().get_user_by_email(email).await? {
            Some(existing) if Some(existing.id.as_str()) != owner => Err(DomainError::Conflict(
                format!("Email '{}' is already taken", email),
            )),
            _ => Ok(()),
        }
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.password_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }
}

fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name: name is required".into()));
    }
    Ok(name.to_string())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
