use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfigTorrents {
    pub table_name: String,
    pub column_id: String,
    pub column_info_hash: String,
    pub column_status: String,
    pub column_snatched: String,
    pub column_last_action: String,
}
