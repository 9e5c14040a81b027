use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Stats {
    pub started: i64,
    pub torrents: i64,
    pub users: i64,
    pub seeds: i64,
    pub peers: i64,
    pub completed: i64,
    pub whitelist_enabled: bool,
    pub whitelist: i64,
    pub users_updates: i64,
    pub torrents_updates: i64,
    pub snatches_updates: i64,
    pub transfer_ips_updates: i64,
    pub requests: i64,
    pub throughput: i64,
    pub announces_handled: i64,
    pub scrapes_handled: i64,
    pub failures: i64,
}
