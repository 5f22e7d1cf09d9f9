use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for movie
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_at: Option<DateTime<Utc>>,
    pub rating: Option<i32>,
    pub duration: Option<i32>,
}
