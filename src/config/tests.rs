#[cfg(test)]
mod config_tests {
    use crate::config::structs::configuration::Configuration;
    use crate::database::enums::database_drivers::DatabaseDrivers;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::init();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database.engine, DatabaseDrivers::sqlite3);
        assert_eq!(config.tracker_config.peers_returned, 50);
        assert!(config.tracker_config.announce_interval >= config.tracker_config.announce_interval_minimum);
        assert_eq!(config.http_server.len(), 1);
        assert_eq!(config.http_server[0].request_timeout, 20);
    }

    #[test]
    fn test_configuration_toml_round_trip() {
        let config = Configuration::init();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed = Configuration::load(serialized.as_bytes()).unwrap();
        assert_eq!(parsed.log_level, config.log_level);
        assert_eq!(parsed.tracker_config.announce_interval, config.tracker_config.announce_interval);
        assert_eq!(parsed.database_structure.users.table_name, config.database_structure.users.table_name);
        assert_eq!(parsed.database_structure.torrents.column_info_hash, config.database_structure.torrents.column_info_hash);
        assert_eq!(parsed.http_server[0].bind_address, config.http_server[0].bind_address);
    }

    #[test]
    fn test_configuration_rejects_garbage() {
        assert!(Configuration::load(b"not [valid} toml=").is_err());
    }
}
