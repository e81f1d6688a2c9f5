/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identity of a user as issued by the external auth provider.
///
/// Users are not stored in this service; the id is an opaque string.
pub type UserId = String;
