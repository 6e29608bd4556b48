//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod company_repository;
pub mod repository_provider;
pub mod user_repository;

pub use company_repository::SeaOrmCompanyRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::sea_query::LikeExpr;

/// `LIKE '%search%'` with the wildcard characters of `search` taken literally.
pub(crate) fn contains_pattern(search: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::{Alias, Expr, Query, SqliteQueryBuilder};

    use super::contains_pattern;

    fn render(search: &str) -> String {
        Query::select()
            .column(Alias::new("name"))
            .from(Alias::new("users"))
            .and_where(Expr::col(Alias::new("name")).like(contains_pattern(search)))
            .to_string(SqliteQueryBuilder)
    }

    #[test]
    fn wildcards_are_escaped() {
        assert!(render("john_doe").contains(r"LIKE '%john\_doe%' ESCAPE '\'"));
        assert!(render("100%").contains(r"LIKE '%100\%%' ESCAPE '\'"));
        assert!(render(r"a\b").contains(r"LIKE '%a\\b%' ESCAPE '\'"));
    }

    #[test]
    fn plain_text_is_untouched() {
        assert!(render("acme").contains("LIKE '%acme%'"));
    }
}
