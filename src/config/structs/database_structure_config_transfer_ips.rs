use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfigTransferIps {
    pub table_name: String,
    pub column_user_id: String,
    pub column_torrent_id: String,
    pub column_ip: String,
    pub column_port: String,
    pub column_uploaded: String,
    pub column_downloaded: String,
    pub column_started: String,
    pub column_updated: String,
}
