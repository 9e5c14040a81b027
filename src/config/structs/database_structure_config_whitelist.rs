use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DatabaseStructureConfigWhitelist {
    pub table_name: String,
    pub column_peer_id: String,
}
