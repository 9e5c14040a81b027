use std::collections::BTreeMap;
use std::process::exit;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64};
use futures_util::TryStreamExt;
use log::{error, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, Error, Pool, Row, Sqlite};
use crate::common::common::hex2bin;
use crate::config::structs::configuration::Configuration;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::tracker::enums::torrent_status::TorrentStatus;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::passkey::PassKey;
use crate::tracker::structs::snatch_delta::SnatchDelta;
use crate::tracker::structs::torrent_delta::TorrentDelta;
use crate::tracker::structs::torrent_entry::TorrentEntry;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::tracker::structs::transfer_ip_delta::TransferIpDelta;
use crate::tracker::structs::user_delta::UserDelta;
use crate::tracker::structs::user_entry_item::UserEntryItem;

const LOG_PREFIX: &str = "[SQLite3]";
const LOAD_PAGE_SIZE: u64 = 100000;
const INSERT_CHUNK_SIZE: usize = 500;

impl DatabaseConnectorSQLite {
    #[tracing::instrument(level = "debug")]
    pub async fn create(dsl: &str) -> Result<Pool<Sqlite>, Error>
    {
        SqlitePoolOptions::new().connect_with(
            SqliteConnectOptions::from_str(dsl)?
                .create_if_missing(true)
                .log_statements(log::LevelFilter::Debug)
        ).await
    }

    #[tracing::instrument(level = "debug")]
    pub async fn database_connector(config: Arc<Configuration>, create_database: bool) -> DatabaseConnector
    {
        let sqlite_connect = DatabaseConnectorSQLite::create(config.database.path.as_str()).await;
        if let Err(error) = sqlite_connect {
            error!("{LOG_PREFIX} Unable to connect to SQLite3 on DSL {}", config.database.path);
            error!("{LOG_PREFIX} Message: {error}");
            exit(1);
        }

        let structure = DatabaseConnector {
            config: config.clone(),
            engine: DatabaseDrivers::sqlite3,
            sqlite: Some(DatabaseConnectorSQLite { pool: sqlite_connect.unwrap() }),
            mysql: None,
        };

        if create_database {
            structure.sqlite.as_ref().unwrap().create_database(&config).await;
        }

        structure
    }

    #[tracing::instrument(level = "debug")]
    pub async fn create_database(&self, config: &Arc<Configuration>)
    {
        info!("[BOOT] Database creation triggered for SQLite3.");
        let structure = &config.database_structure;

        info!("[BOOT SQLite3] Creating table {}", structure.users.table_name);
        let query = format!(
            "CREATE TABLE IF NOT EXISTS `{}` (`{}` INTEGER PRIMARY KEY AUTOINCREMENT, `{}` TEXT NOT NULL UNIQUE, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 1, `{}` INTEGER NOT NULL DEFAULT -1, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0)",
            structure.users.table_name,
            structure.users.column_id,
            structure.users.column_passkey,
            structure.users.column_uploaded,
            structure.users.column_downloaded,
            structure.users.column_enabled,
            structure.users.column_slots,
            structure.users.column_slots_used,
            structure.users.column_torrents_limit,
        );
        if let Err(error) = sqlx::query(&query).execute(&self.pool).await {
            panic!("{LOG_PREFIX} Error: {error}");
        }

        info!("[BOOT SQLite3] Creating table {}", structure.torrents.table_name);
        let query = format!(
            "CREATE TABLE IF NOT EXISTS `{}` (`{}` INTEGER PRIMARY KEY AUTOINCREMENT, `{}` BLOB NOT NULL UNIQUE, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0)",
            structure.torrents.table_name,
            structure.torrents.column_id,
            structure.torrents.column_info_hash,
            structure.torrents.column_status,
            structure.torrents.column_snatched,
            structure.torrents.column_last_action,
        );
        if let Err(error) = sqlx::query(&query).execute(&self.pool).await {
            panic!("{LOG_PREFIX} Error: {error}");
        }

        info!("[BOOT SQLite3] Creating table {}", structure.history.table_name);
        let query = format!(
            "CREATE TABLE IF NOT EXISTS `{}` (`{}` INTEGER NOT NULL, `{}` INTEGER NOT NULL, `{}` INTEGER NOT NULL)",
            structure.history.table_name,
            structure.history.column_user_id,
            structure.history.column_torrent_id,
            structure.history.column_completed_at,
        );
        if let Err(error) = sqlx::query(&query).execute(&self.pool).await {
            panic!("{LOG_PREFIX} Error: {error}");
        }

        info!("[BOOT SQLite3] Creating table {}", structure.transfer_ips.table_name);
        let query = format!(
            "CREATE TABLE IF NOT EXISTS `{}` (`{}` INTEGER NOT NULL, `{}` INTEGER NOT NULL, `{}` TEXT NOT NULL, `{}` INTEGER NOT NULL, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0, `{}` INTEGER NOT NULL DEFAULT 0)",
            structure.transfer_ips.table_name,
            structure.transfer_ips.column_user_id,
            structure.transfer_ips.column_torrent_id,
            structure.transfer_ips.column_ip,
            structure.transfer_ips.column_port,
            structure.transfer_ips.column_uploaded,
            structure.transfer_ips.column_downloaded,
            structure.transfer_ips.column_started,
            structure.transfer_ips.column_updated,
        );
        if let Err(error) = sqlx::query(&query).execute(&self.pool).await {
            panic!("{LOG_PREFIX} Error: {error}");
        }

        info!("[BOOT SQLite3] Creating table {}", structure.whitelist.table_name);
        let query = format!(
            "CREATE TABLE IF NOT EXISTS `{}` (`{}` TEXT NOT NULL PRIMARY KEY)",
            structure.whitelist.table_name,
            structure.whitelist.column_peer_id,
        );
        if let Err(error) = sqlx::query(&query).execute(&self.pool).await {
            panic!("{LOG_PREFIX} Error: {error}");
        }
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_users(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        let mut start = 0u64;
        let mut handled = 0u64;
        let structure = &tracker.config.database_structure.users;
        let mut snapshot: BTreeMap<PassKey, UserEntryItem> = BTreeMap::new();
        loop {
            let query = format!(
                "SELECT `{}`, `{}`, `{}`, `{}`, `{}`, `{}`, `{}` FROM `{}` LIMIT {} OFFSET {}",
                structure.column_id,
                structure.column_passkey,
                structure.column_uploaded,
                structure.column_downloaded,
                structure.column_enabled,
                structure.column_slots,
                structure.column_torrents_limit,
                structure.table_name,
                LOAD_PAGE_SIZE,
                start,
            );
            let mut rows = sqlx::query(&query).fetch(&self.pool);
            while let Some(result) = rows.try_next().await? {
                handled += 1;
                let passkey_data: String = result.get(structure.column_passkey.as_str());
                let passkey = match PassKey::from_str(&passkey_data) {
                    Ok(passkey) => passkey,
                    Err(_) => {
                        warn!("{LOG_PREFIX} Skipping user with invalid passkey '{passkey_data}'");
                        continue;
                    }
                };
                snapshot.insert(passkey, UserEntryItem {
                    user_id: result.get::<i64, &str>(structure.column_id.as_str()) as u64,
                    passkey,
                    enabled: result.get::<i64, &str>(structure.column_enabled.as_str()) != 0,
                    slots: result.get::<i64, &str>(structure.column_slots.as_str()),
                    torrents_limit: result.get::<i64, &str>(structure.column_torrents_limit.as_str()) as u64,
                    uploaded: AtomicU64::new(result.get::<i64, &str>(structure.column_uploaded.as_str()) as u64),
                    downloaded: AtomicU64::new(result.get::<i64, &str>(structure.column_downloaded.as_str()) as u64),
                    slots_used: AtomicI64::new(0),
                    swarms_used: AtomicI64::new(0),
                });
            }
            start += LOAD_PAGE_SIZE;
            if handled < start {
                break;
            }
            info!("{LOG_PREFIX} Handled {handled} users");
        }
        Ok(tracker.reload_users(snapshot))
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_whitelist(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        let structure = &tracker.config.database_structure.whitelist;
        let query = format!(
            "SELECT `{}` FROM `{}`",
            structure.column_peer_id,
            structure.table_name,
        );
        let mut prefixes = Vec::new();
        let mut rows = sqlx::query(&query).fetch(&self.pool);
        while let Some(result) = rows.try_next().await? {
            prefixes.push(result.get::<String, &str>(structure.column_peer_id.as_str()));
        }
        Ok(tracker.reload_whitelist(prefixes))
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_torrents(&self, tracker: Arc<TorrentTracker>) -> Result<u64, Error>
    {
        let mut start = 0u64;
        let mut handled = 0u64;
        let structure = &tracker.config.database_structure.torrents;
        let mut snapshot: BTreeMap<InfoHash, TorrentEntry> = BTreeMap::new();
        loop {
            let query = format!(
                "SELECT `{}`, HEX(`{}`) AS `{}`, `{}`, `{}`, `{}` FROM `{}` LIMIT {} OFFSET {}",
                structure.column_id,
                structure.column_info_hash,
                structure.column_info_hash,
                structure.column_status,
                structure.column_snatched,
                structure.column_last_action,
                structure.table_name,
                LOAD_PAGE_SIZE,
                start,
            );
            let mut rows = sqlx::query(&query).fetch(&self.pool);
            while let Some(result) = rows.try_next().await? {
                handled += 1;
                let info_hash_data: String = result.get(structure.column_info_hash.as_str());
                let info_hash = match hex2bin(info_hash_data.clone()) {
                    Ok(hash) => InfoHash(hash),
                    Err(_) => {
                        warn!("{LOG_PREFIX} Skipping torrent with invalid info hash '{info_hash_data}'");
                        continue;
                    }
                };
                snapshot.insert(info_hash, TorrentEntry {
                    torrent_id: result.get::<i64, &str>(structure.column_id.as_str()) as u64,
                    status: TorrentStatus::from(result.get::<i64, &str>(structure.column_status.as_str()) as u8),
                    snatched: result.get::<i64, &str>(structure.column_snatched.as_str()) as u64,
                    updated: result.get::<i64, &str>(structure.column_last_action.as_str()) as u64,
                    seeds: Default::default(),
                    peers: Default::default(),
                });
            }
            start += LOAD_PAGE_SIZE;
            if handled < start {
                break;
            }
            info!("{LOG_PREFIX} Handled {handled} torrents");
        }
        Ok(tracker.reload_torrents(snapshot))
    }

    #[tracing::instrument(level = "debug", skip(batch))]
    pub async fn save_user_deltas(&self, config: &Arc<Configuration>, batch: &[UserDelta]) -> Result<u64, Error>
    {
        let structure = &config.database_structure.users;
        let mut transaction = self.pool.begin().await?;
        let mut handled = 0u64;
        for user_delta in batch {
            let query = format!(
                "UPDATE `{}` SET `{}`=`{}`+{}, `{}`=`{}`+{} WHERE `{}`={}",
                structure.table_name,
                structure.column_uploaded,
                structure.column_uploaded,
                user_delta.uploaded_delta,
                structure.column_downloaded,
                structure.column_downloaded,
                user_delta.downloaded_delta,
                structure.column_id,
                user_delta.user_id,
            );
            sqlx::query(&query).execute(&mut *transaction).await?;
            handled += 1;
        }
        transaction.commit().await?;
        Ok(handled)
    }

    #[tracing::instrument(level = "debug", skip(batch))]
    pub async fn save_torrent_deltas(&self, config: &Arc<Configuration>, batch: &[TorrentDelta]) -> Result<u64, Error>
    {
        let structure = &config.database_structure.torrents;
        let mut transaction = self.pool.begin().await?;
        let mut handled = 0u64;
        for torrent_delta in batch {
            let query = format!(
                "UPDATE `{}` SET `{}`=`{}`+{}, `{}`={} WHERE `{}`={}",
                structure.table_name,
                structure.column_snatched,
                structure.column_snatched,
                torrent_delta.snatched_delta,
                structure.column_last_action,
                torrent_delta.last_action,
                structure.column_id,
                torrent_delta.torrent_id,
            );
            sqlx::query(&query).execute(&mut *transaction).await?;
            handled += 1;
        }
        transaction.commit().await?;
        Ok(handled)
    }

    #[tracing::instrument(level = "debug", skip(batch))]
    pub async fn save_snatches(&self, config: &Arc<Configuration>, batch: &[SnatchDelta]) -> Result<u64, Error>
    {
        let structure = &config.database_structure.history;
        let mut transaction = self.pool.begin().await?;
        let mut handled = 0u64;
        for chunk in batch.chunks(INSERT_CHUNK_SIZE) {
            let values = chunk.iter()
                .map(|snatch_delta| format!(
                    "({}, {}, {})",
                    snatch_delta.user_id,
                    snatch_delta.torrent_id,
                    snatch_delta.completed_at,
                ))
                .collect::<Vec<String>>()
                .join(", ");
            let query = format!(
                "INSERT INTO `{}` (`{}`, `{}`, `{}`) VALUES {}",
                structure.table_name,
                structure.column_user_id,
                structure.column_torrent_id,
                structure.column_completed_at,
                values,
            );
            sqlx::query(&query).execute(&mut *transaction).await?;
            handled += chunk.len() as u64;
        }
        transaction.commit().await?;
        Ok(handled)
    }

    #[tracing::instrument(level = "debug", skip(batch))]
    pub async fn save_transfer_ips(&self, config: &Arc<Configuration>, batch: &[TransferIpDelta]) -> Result<u64, Error>
    {
        let structure = &config.database_structure.transfer_ips;
        let mut transaction = self.pool.begin().await?;
        let mut handled = 0u64;
        for chunk in batch.chunks(INSERT_CHUNK_SIZE) {
            let values = chunk.iter()
                .map(|transfer_ip_delta| format!(
                    "({}, {}, '{}', {}, {}, {}, {}, {})",
                    transfer_ip_delta.user_id,
                    transfer_ip_delta.torrent_id,
                    transfer_ip_delta.ip,
                    transfer_ip_delta.port,
                    transfer_ip_delta.uploaded,
                    transfer_ip_delta.downloaded,
                    transfer_ip_delta.started,
                    transfer_ip_delta.updated,
                ))
                .collect::<Vec<String>>()
                .join(", ");
            let query = format!(
                "INSERT INTO `{}` (`{}`, `{}`, `{}`, `{}`, `{}`, `{}`, `{}`, `{}`) VALUES {}",
                structure.table_name,
                structure.column_user_id,
                structure.column_torrent_id,
                structure.column_ip,
                structure.column_port,
                structure.column_uploaded,
                structure.column_downloaded,
                structure.column_started,
                structure.column_updated,
                values,
            );
            sqlx::query(&query).execute(&mut *transaction).await?;
            handled += chunk.len() as u64;
        }
        transaction.commit().await?;
        Ok(handled)
    }

    #[tracing::instrument(level = "debug", skip(batch))]
    pub async fn save_slots(&self, config: &Arc<Configuration>, batch: &[(u64, i64)]) -> Result<u64, Error>
    {
        let structure = &config.database_structure.users;
        let mut transaction = self.pool.begin().await?;
        let mut handled = 0u64;
        for (user_id, slots_used) in batch {
            let query = format!(
                "UPDATE `{}` SET `{}`={} WHERE `{}`={}",
                structure.table_name,
                structure.column_slots_used,
                slots_used,
                structure.column_id,
                user_id,
            );
            sqlx::query(&query).execute(&mut *transaction).await?;
            handled += 1;
        }
        transaction.commit().await?;
        Ok(handled)
    }
}
