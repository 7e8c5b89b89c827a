/// Story identifiers are UUIDs generated at insert time.
pub type StoryId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
