use std::sync::Arc;
use crate::config::structs::configuration::Configuration;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::database_connector_mysql::DatabaseConnectorMySQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;

/// Engine dispatch over the configured database backend.
#[derive(Debug, Clone)]
pub struct DatabaseConnector {
    pub config: Arc<Configuration>,
    pub engine: DatabaseDrivers,
    pub sqlite: Option<DatabaseConnectorSQLite>,
    pub mysql: Option<DatabaseConnectorMySQL>,
}
