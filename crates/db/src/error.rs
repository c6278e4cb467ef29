//! Persistence-layer error type.
//!
//! Wraps [`CoreError`] for domain errors and classifies Postgres constraint
//! violations into them so callers see the field or key that was violated
//! instead of a raw driver error.

use devicetrace_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An unclassified database error.
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),
}

/// Convenience type alias for repository return values.
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("");
            match db_err.code().as_deref() {
                // Unique violation: the only unique key is the hardware ID.
                Some("23505") if constraint.starts_with("uq_") => {
                    return Self::Core(CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    )));
                }
                // Check violation: ck_<table>_<field> names the field.
                Some("23514") if constraint.starts_with("ck_") => {
                    let field = field_from_check_constraint(constraint, db_err.table());
                    return Self::Core(CoreError::Validation(format!(
                        "Value out of range for {field}"
                    )));
                }
                // FK violation: the referenced device does not exist.
                Some("23503") => {
                    return Self::Core(CoreError::Validation(format!(
                        "Invalid reference violates foreign key: {constraint}"
                    )));
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
        }
        Self::Sqlx(err)
    }
}

impl From<validator::ValidationErrors> for DbError {
    fn from(errs: validator::ValidationErrors) -> Self {
        Self::Core(CoreError::Validation(errs.to_string()))
    }
}

/// Recover the field name from a `ck_<table>_<field>` constraint.
fn field_from_check_constraint<'a>(constraint: &'a str, table: Option<&str>) -> &'a str {
    let stripped = constraint.strip_prefix("ck_").unwrap_or(constraint);
    table
        .and_then(|t| stripped.strip_prefix(t))
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(stripped)
}
