use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::torrent_entry::TorrentEntry;

/// Sharded torrent storage.
///
/// 256 shards selected by the first byte of the info hash. A shard's write
/// lock is the serialisation point for every swarm it contains.
#[derive(Debug)]
pub struct TorrentSharding {
    pub shards: [Arc<RwLock<BTreeMap<InfoHash, TorrentEntry>>>; 256],
}
