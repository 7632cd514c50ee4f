use sea_orm::FromQueryResult;
use serde::Serialize;

/// `expires_at` is a millisecond epoch. Logout rewrites it to 0 instead of
/// deleting the row.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: i64,
}
