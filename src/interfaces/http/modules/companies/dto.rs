//! Company DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Company, GetCompanyDto};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDto {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create / rename form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompanyForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required (max 255 characters)"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCompaniesParams {
    /// Substring match on the name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<ListCompaniesParams> for GetCompanyDto {
    fn from(p: ListCompaniesParams) -> Self {
        Self {
            search: p.search.filter(|s| !s.trim().is_empty()),
            page: p.page,
            page_size: p.page_size,
        }
    }
}
