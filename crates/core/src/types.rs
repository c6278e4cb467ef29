/// Device primary keys are PostgreSQL BIGSERIAL, shared across the whole
/// joined-table hierarchy.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
