pub mod database_connector;
pub mod database_connector_mysql;
pub mod database_connector_sqlite;
