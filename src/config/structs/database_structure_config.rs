use serde::{Deserialize, Serialize};
use crate::config::structs::database_structure_config_history::DatabaseStructureConfigHistory;
use crate::config::structs::database_structure_config_torrents::DatabaseStructureConfigTorrents;
use crate::config::structs::database_structure_config_transfer_ips::DatabaseStructureConfigTransferIps;
use crate::config::structs::database_structure_config_users::DatabaseStructureConfigUsers;
use crate::config::structs::database_structure_config_whitelist::DatabaseStructureConfigWhitelist;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfig {
    pub users: DatabaseStructureConfigUsers,
    pub torrents: DatabaseStructureConfigTorrents,
    pub history: DatabaseStructureConfigHistory,
    pub transfer_ips: DatabaseStructureConfigTransferIps,
    pub whitelist: DatabaseStructureConfigWhitelist,
}
