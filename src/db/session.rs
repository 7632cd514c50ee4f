use sea_orm::{DbBackend, Statement};

use crate::db::DbService;
use crate::types::error::AppError;

impl DbService {
    /// A session is active iff a row with this token has `expires_at` strictly
    /// in the future. Logged-out sessions stay in the table with
    /// `expires_at = 0`, so they fail this check without being deleted.
    pub async fn session_is_active(&self, token: &str, now_ms: i64) -> Result<bool, AppError> {
        let sql = match self.backend() {
            DbBackend::Postgres => {
                "SELECT * FROM users_sessions WHERE token = $1 AND expires_at > $2"
            }
            _ => "SELECT * FROM users_sessions WHERE token = ? AND expires_at > ?",
        };
        let rows = self
            .run_query(Statement::from_sql_and_values(
                self.backend(),
                sql,
                [token.into(), now_ms.into()],
            ))
            .await?;
        Ok(!rows.is_empty())
    }
}
