use sqlx::{Pool, Sqlite};

#[derive(Debug, Clone)]
pub struct DatabaseConnectorSQLite {
    pub pool: Pool<Sqlite>,
}
