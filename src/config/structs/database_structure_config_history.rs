use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfigHistory {
    pub table_name: String,
    pub column_user_id: String,
    pub column_torrent_id: String,
    pub column_completed_at: String,
}
