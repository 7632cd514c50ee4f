use sea_orm::FromQueryResult;
use serde::Serialize;

/// `password` holds the salted digest, never the plaintext.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password: String,
}
