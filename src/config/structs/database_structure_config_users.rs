use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfigUsers {
    pub table_name: String,
    pub column_id: String,
    pub column_passkey: String,
    pub column_uploaded: String,
    pub column_downloaded: String,
    pub column_enabled: String,
    pub column_slots: String,
    pub column_slots_used: String,
    pub column_torrents_limit: String,
}
