use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use parking_lot::RwLock;
use crate::config::structs::configuration::Configuration;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::stats::structs::stats_atomics::StatsAtomics;
use crate::tracker::structs::passkey::PassKey;
use crate::tracker::structs::sync_channels::SyncChannels;
use crate::tracker::structs::torrent_sharding::TorrentSharding;
use crate::tracker::structs::user_entry_item::UserEntryItem;

/// The process-wide tracker state, shared as `Arc<TorrentTracker>` between
/// the HTTP service and every background worker.
///
/// Lock order, where more than one is held: users map, then a torrent shard,
/// then the whitelist.
#[derive(Debug)]
pub struct TorrentTracker {
    pub config: Arc<Configuration>,
    pub torrents_sharding: Arc<TorrentSharding>,
    pub users: Arc<RwLock<BTreeMap<PassKey, Arc<UserEntryItem>>>>,
    pub whitelist: Arc<RwLock<Vec<String>>>,
    pub stats: Arc<StatsAtomics>,
    pub sync: SyncChannels,
    pub sqlx: DatabaseConnector,
    /// Set during shutdown: handlers return immediately without touching
    /// state while the listeners drain.
    pub terminate: Arc<AtomicBool>,
}
