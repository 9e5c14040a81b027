use std::sync::Arc;
use sqlx::Error;
use crate::config::structs::configuration::Configuration;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_mysql::DatabaseConnectorMySQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::tracker::structs::snatch_delta::SnatchDelta;
use crate::tracker::structs::torrent_delta::TorrentDelta;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::tracker::structs::transfer_ip_delta::TransferIpDelta;
use crate::tracker::structs::user_delta::UserDelta;

impl DatabaseConnector {
    pub async fn new(config: Arc<Configuration>, create_database: bool) -> DatabaseConnector
    {
        match &config.database.engine {
            DatabaseDrivers::sqlite3 => { DatabaseConnectorSQLite::database_connector(config, create_database).await }
            DatabaseDrivers::mysql => { DatabaseConnectorMySQL::database_connector(config, create_database).await }
        }
    }

    pub async fn load_users(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().load_users(tracker).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().load_users(tracker).await }
        }
    }

    pub async fn load_whitelist(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().load_whitelist(tracker).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().load_whitelist(tracker).await }
        }
    }

    pub async fn load_torrents(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().load_torrents(tracker).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().load_torrents(tracker).await }
        }
    }

    pub async fn save_user_deltas(&self, batch: &[UserDelta]) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().save_user_deltas(&self.config, batch).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().save_user_deltas(&self.config, batch).await }
        }
    }

    pub async fn save_torrent_deltas(&self, batch: &[TorrentDelta]) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().save_torrent_deltas(&self.config, batch).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().save_torrent_deltas(&self.config, batch).await }
        }
    }

    pub async fn save_snatches(&self, batch: &[SnatchDelta]) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().save_snatches(&self.config, batch).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().save_snatches(&self.config, batch).await }
        }
    }

    pub async fn save_transfer_ips(&self, batch: &[TransferIpDelta]) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().save_transfer_ips(&self.config, batch).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().save_transfer_ips(&self.config, batch).await }
        }
    }

    pub async fn save_slots(&self, batch: &[(u64, i64)]) -> Result<u64, Error>
    {
        match self.engine {
            DatabaseDrivers::sqlite3 => { self.sqlite.as_ref().unwrap().save_slots(&self.config, batch).await }
            DatabaseDrivers::mysql => { self.mysql.as_ref().unwrap().save_slots(&self.config, batch).await }
        }
    }
}
