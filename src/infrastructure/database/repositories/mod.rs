//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod certificate_repository;
pub mod repository_provider;
pub mod student_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{DbErr, SqlErr};

use crate::shared::errors::{DomainError, InfraError};

/// Map a driver error, turning unique-index violations into `Conflict`.
pub(crate) fn map_db_err(err: DbErr, conflict_message: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(conflict_message.to_string())
        }
        _ => InfraError::Database(err).into(),
    }
}

pub(crate) fn db_err(err: DbErr) -> DomainError {
    InfraError::Database(err).into()
}

/// `LOWER(col) LIKE '%needle%'`. `needle` must already be lower-cased.
pub(crate) fn lower_contains<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

/// SQLite's `LOWER` only folds ASCII; other needles are matched in memory
/// with the same Unicode folding the JSON store uses.
pub(crate) fn sql_can_match(needle: &str) -> bool {
    needle.is_ascii()
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn only_ascii_needles_go_to_sql() {
        assert!(sql_can_match("budi"));
        assert!(!sql_can_match("ümit"));
    }
}
