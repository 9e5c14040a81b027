use sqlx::{MySql, Pool};

#[derive(Debug, Clone)]
pub struct DatabaseConnectorMySQL {
    pub pool: Pool<MySql>,
}
