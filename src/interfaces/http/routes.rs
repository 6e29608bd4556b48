//! Named resource routes
//!
//! Handlers redirect through these helpers instead of formatting paths
//! inline, so the router and the redirects cannot drift apart.

/// `companies.index`
pub fn companies_index() -> String {
    "/companies".to_string()
}

/// `companies.users.index`
pub fn companies_users_index(company_id: &str) -> String {
    format!("/companies/{}/users", company_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_routes() {
        assert_eq!(companies_index(), "/companies");
        assert_eq!(companies_users_index("c1"), "/companies/c1/users");
    }
}
