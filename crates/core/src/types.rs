/// All primary keys are UUIDs (v7, time-ordered). They serialize as plain
/// strings in JSON, which is also how clients send them back.
pub type Id = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
