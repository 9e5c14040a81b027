use serde::{
    Deserialize,
    Serialize
};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackerConfig {
    /// Base announce interval in seconds; the served value is randomised
    /// within `announce_interval ± announce_interval_jitter`.
    pub announce_interval: u64,
    pub announce_interval_jitter: u64,
    pub announce_interval_minimum: u64,
    /// Upper bound on peers returned per announce; `numwant` is capped here.
    pub peers_returned: u64,
    pub peers_timeout: u64,
    pub peers_cleanup_interval: u64,
    /// Full user/torrent snapshot reload period in seconds.
    pub reload_interval: u64,
    pub whitelist_enabled: bool,
    pub slots_enabled: bool,
    pub slots_update_interval: u64,
    pub scrape_enabled: bool,
    pub transfer_ips_enabled: bool,
    pub record_enabled: bool,
    pub record_directory: String,
    pub sync_batch_size: u64,
    pub sync_flush_interval: u64,
    pub sync_max_retries: u64,
    pub sync_retry_delay: u64,
}
