pub mod configuration;
pub mod database_config;
pub mod database_structure_config;
pub mod database_structure_config_history;
pub mod database_structure_config_torrents;
pub mod database_structure_config_transfer_ips;
pub mod database_structure_config_users;
pub mod database_structure_config_whitelist;
pub mod http_server_config;
pub mod sentry_config;
pub mod tracker_config;
