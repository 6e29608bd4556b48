//! Company user DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{GetUserDto, User};
use crate::interfaces::http::common::empty_string_as_none;

/// User API representation. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.as_str().to_string(),
            company_id: u.company_id,
            created_at: u.created_at,
            updated_at: u.updated_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// Create user form (`application/x-www-form-urlencoded`)
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation (422) rather than by the decoder (400).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required (max 255 characters)"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        email(message = "invalid email format"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 8, max = 255, message = "password must be 8-255 characters"),
        custom(function = "not_blank")
    )]
    pub password: String,
    /// `admin` or `user` (default)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<String>,
}

/// Update user form. An empty `password` keeps the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required (max 255 characters)"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        email(message = "invalid email format"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(
        length(min = 8, max = 255, message = "password must be 8-255 characters"),
        custom(function = "not_blank")
    )]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("password must not be blank".into()));
    }
    Ok(())
}

/// List users query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Search by name or email
    pub search: Option<String>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page (max 100)
    pub page_size: Option<u32>,
    /// Sort field (`name`, `email`); newest first otherwise
    pub sort_by: Option<String>,
}

impl From<ListUsersParams> for GetUserDto {
    fn from(p: ListUsersParams) -> Self {
        Self {
            company_id: None,
            search: p.search.filter(|s| !s.trim().is_empty()),
            page: p.page,
            page_size: p.page_size,
            sort_by: p.sort_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form(name: &str, email: &str, password: &str) -> CreateUserForm {
        CreateUserForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[test]
    fn create_form_rules() {
        assert!(create_form("test user", "test@test.com", "password")
            .validate()
            .is_ok());

        let errors = create_form("", "not-an-email", "short").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn update_form_password_is_optional() {
        let form = UpdateUserForm {
            name: "changed".to_string(),
            email: "changed@test.com".to_string(),
            password: None,
            role: None,
        };
        assert!(form.validate().is_ok());

        let form = UpdateUserForm {
            password: Some("short".to_string()),
            ..form
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn whitespace_passwords_are_rejected() {
        let errors = create_form("test user", "test@test.com", "        ")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let form = UpdateUserForm {
            name: "changed".to_string(),
            email: "changed@test.com".to_string(),
            password: Some("          ".to_string()),
            role: None,
        };
        assert!(form.validate().unwrap_err().field_errors().contains_key("password"));

        assert!(create_form("test user", "test@test.com", " pass word ")
            .validate()
            .is_ok());
    }

    #[test]
    fn blank_search_is_dropped() {
        let dto = GetUserDto::from(ListUsersParams {
            search: Some("  ".to_string()),
            ..Default::default()
        });
        assert!(dto.search.is_none());
        assert!(dto.company_id.is_none());
    }
}
