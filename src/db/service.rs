use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, QueryResult,
    Statement,
};
use tracing::info;

use crate::db::query::{self, Field};
use crate::types::error::AppError;

#[derive(Clone)]
pub struct DbService {
    pub(crate) db: DatabaseConnection,
}

impl DbService {
    pub async fn new(url: &str) -> Result<Self, DbErr> {
        Self::connect(ConnectOptions::new(url.to_owned())).await
    }

    pub async fn connect(options: ConnectOptions) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let db = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&db, None).await?;
        info!("Migrations finished.");
        Ok(Self { db })
    }

    pub fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// Executes a prepared statement. Driver failures are logged in full here
    /// and collapsed to a generic error; callers never see the driver detail.
    pub async fn run_query(&self, stmt: Statement) -> Result<Vec<QueryResult>, AppError> {
        self.db.query_all(stmt).await.map_err(|err| {
            tracing::error!(error = ?err, "A DB error occurred");
            AppError::QueryFailed
        })
    }

    pub async fn insert_one(
        &self,
        table: &str,
        fields: &[Field<'_>],
    ) -> Result<Vec<QueryResult>, AppError> {
        let (sql, params) = query::insert(self.backend(), table, fields);
        self.run_query(Statement::from_sql_and_values(self.backend(), sql, params))
            .await
    }

    pub async fn update_one(
        &self,
        table: &str,
        fields: &[Field<'_>],
        id: Field<'_>,
    ) -> Result<Vec<QueryResult>, AppError> {
        let (sql, params) = query::update(self.backend(), table, fields, id);
        self.run_query(Statement::from_sql_and_values(self.backend(), sql, params))
            .await
    }

    /// Equality filters only; an empty filter list returns all rows up to
    /// `limit`.
    pub async fn query_all(
        &self,
        table: &str,
        filters: &[Field<'_>],
        limit: usize,
    ) -> Result<Vec<QueryResult>, AppError> {
        let (sql, params) = query::select_all(self.backend(), table, filters, limit);
        self.run_query(Statement::from_sql_and_values(self.backend(), sql, params))
            .await
    }

    pub async fn delete_by_id(
        &self,
        table: &str,
        id: Field<'_>,
    ) -> Result<Vec<QueryResult>, AppError> {
        let (sql, params) = query::delete_by_id(self.backend(), table, id);
        self.run_query(Statement::from_sql_and_values(self.backend(), sql, params))
            .await
    }
}
