//! Access guard
//!
//! An admin is either *global* (no owning company) and manages every
//! company, or *company-bound* and manages only the company it belongs to.
//! Non-admin accounts manage nothing.

use crate::domain::{DomainError, DomainResult, User, UserRole};

/// The authenticated account a request acts on behalf of
#[derive(Clone, Debug)]
pub struct Actor {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub company_id: Option<String>,
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            company_id: user.company_id,
        }
    }
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_global_admin(&self) -> bool {
        self.is_admin() && self.company_id.is_none()
    }

    pub fn can_manage_company(&self, company_id: &str) -> bool {
        match self.company_id.as_deref() {
            None => self.is_admin(),
            Some(own) => self.is_admin() && own == company_id,
        }
    }
}

/// Allow the request only for an admin entitled to `company_id`.
pub fn ensure_company_admin(actor: &Actor, company_id: &str) -> DomainResult<()> {
    if !actor.is_admin() {
        return Err(DomainError::Forbidden("Admin role required".to_string()));
    }
    if !actor.can_manage_company(company_id) {
        return Err(DomainError::Forbidden(format!(
            "No access to company '{}'",
            company_id
        )));
    }
    Ok(())
}

/// Allow the request only for an admin without an owning company.
pub fn ensure_global_admin(actor: &Actor) -> DomainResult<()> {
    if !actor.is_global_admin() {
        return Err(DomainError::Forbidden(
            "Global admin role required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: UserRole, company_id: Option<&str>) -> Actor {
        Actor {
            user_id: "u-1".to_string(),
            name: "Someone".to_string(),
            email: "someone@example.com".to_string(),
            role,
            company_id: company_id.map(str::to_string),
        }
    }

    #[test]
    fn global_admin_manages_every_company() {
        let admin = actor(UserRole::Admin, None);
        assert!(ensure_company_admin(&admin, "a").is_ok());
        assert!(ensure_company_admin(&admin, "b").is_ok());
        assert!(ensure_global_admin(&admin).is_ok());
    }

    #[test]
    fn company_admin_is_confined_to_its_company() {
        let admin = actor(UserRole::Admin, Some("a"));
        assert!(ensure_company_admin(&admin, "a").is_ok());
        assert!(matches!(
            ensure_company_admin(&admin, "b"),
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_global_admin(&admin),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn plain_user_is_denied() {
        for company in [None, Some("a")] {
            let user = actor(UserRole::User, company);
            assert!(matches!(
                ensure_company_admin(&user, "a"),
                Err(DomainError::Forbidden(_))
            ));
            assert!(ensure_global_admin(&user).is_err());
        }
    }
}
