use std::fs::File;
use std::io::Write;
use std::process::exit;
use std::thread::available_parallelism;
use log::{error, info};
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::database_structure_config::DatabaseStructureConfig;
use crate::config::structs::database_structure_config_history::DatabaseStructureConfigHistory;
use crate::config::structs::database_structure_config_torrents::DatabaseStructureConfigTorrents;
use crate::config::structs::database_structure_config_transfer_ips::DatabaseStructureConfigTransferIps;
use crate::config::structs::database_structure_config_users::DatabaseStructureConfigUsers;
use crate::config::structs::database_structure_config_whitelist::DatabaseStructureConfigWhitelist;
use crate::config::structs::http_server_config::HttpServerConfig;
use crate::config::structs::sentry_config::SentryConfig;
use crate::config::structs::tracker_config::TrackerConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            log_console_interval: 60,
            tracker_config: TrackerConfig {
                announce_interval: 1800,
                announce_interval_jitter: 60,
                announce_interval_minimum: 900,
                peers_returned: 50,
                peers_timeout: 2700,
                peers_cleanup_interval: 900,
                reload_interval: 600,
                whitelist_enabled: false,
                slots_enabled: false,
                slots_update_interval: 900,
                scrape_enabled: true,
                transfer_ips_enabled: false,
                record_enabled: false,
                record_directory: String::from("records"),
                sync_batch_size: 1000,
                sync_flush_interval: 5,
                sync_max_retries: 3,
                sync_retry_delay: 500,
            },
            sentry_config: SentryConfig {
                enabled: false,
                dsn: String::from(""),
            },
            database: DatabaseConfig {
                engine: DatabaseDrivers::sqlite3,
                path: String::from("sqlite://data.db"),
            },
            database_structure: DatabaseStructureConfig {
                users: DatabaseStructureConfigUsers {
                    table_name: String::from("users_main"),
                    column_id: String::from("id"),
                    column_passkey: String::from("passkey"),
                    column_uploaded: String::from("uploaded"),
                    column_downloaded: String::from("downloaded"),
                    column_enabled: String::from("enabled"),
                    column_slots: String::from("slots"),
                    column_slots_used: String::from("slots_used"),
                    column_torrents_limit: String::from("torrents_limit"),
                },
                torrents: DatabaseStructureConfigTorrents {
                    table_name: String::from("torrents"),
                    column_id: String::from("id"),
                    column_info_hash: String::from("info_hash"),
                    column_status: String::from("status"),
                    column_snatched: String::from("snatched"),
                    column_last_action: String::from("last_action"),
                },
                history: DatabaseStructureConfigHistory {
                    table_name: String::from("transfer_history"),
                    column_user_id: String::from("user_id"),
                    column_torrent_id: String::from("torrent_id"),
                    column_completed_at: String::from("completed_at"),
                },
                transfer_ips: DatabaseStructureConfigTransferIps {
                    table_name: String::from("transfer_ips"),
                    column_user_id: String::from("user_id"),
                    column_torrent_id: String::from("torrent_id"),
                    column_ip: String::from("ip"),
                    column_port: String::from("port"),
                    column_uploaded: String::from("uploaded"),
                    column_downloaded: String::from("downloaded"),
                    column_started: String::from("started"),
                    column_updated: String::from("updated"),
                },
                whitelist: DatabaseStructureConfigWhitelist {
                    table_name: String::from("client_whitelist"),
                    column_peer_id: String::from("peer_id"),
                },
            },
            http_server: vec!(
                HttpServerConfig {
                    enabled: true,
                    bind_address: String::from("0.0.0.0:34000"),
                    real_ip: String::from("X-Real-Ip"),
                    keep_alive: 60,
                    request_timeout: 20,
                    disconnect_timeout: 15,
                    threads: available_parallelism().unwrap().get() as u64,
                }
            ),
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => Ok(cfg),
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    pub fn load_from_file(create: bool) -> Result<Configuration, CustomError> {
        match Configuration::load_file("config.toml") {
            Ok(config) => {
                info!("[CONFIG] Loaded config.toml");
                Ok(config)
            }
            Err(error) => {
                error!("[CONFIG] Unable to load config.toml: {error}");
                if create {
                    let config = Configuration::init();
                    let config_toml = toml::to_string_pretty(&config).unwrap();
                    match Configuration::save_file("config.toml", config_toml) {
                        Ok(()) => {
                            info!("[CONFIG] Created default config.toml, edit it and restart");
                            exit(0);
                        }
                        Err(save_error) => {
                            error!("[CONFIG] Unable to write config.toml: {save_error}");
                        }
                    }
                }
                Err(CustomError::new("could not load the configuration"))
            }
        }
    }
}
