use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::torrent_entry::TorrentEntry;
use crate::tracker::structs::torrent_sharding::TorrentSharding;

impl Default for TorrentSharding {
    fn default() -> Self {
        Self::new()
    }
}

impl TorrentSharding {
    #[tracing::instrument(level = "debug")]
    pub fn new() -> TorrentSharding {
        TorrentSharding {
            shards: std::array::from_fn(|_| Arc::new(RwLock::new(BTreeMap::new()))),
        }
    }

    #[inline(always)]
    pub fn get_shard(&self, shard: u8) -> Arc<RwLock<BTreeMap<InfoHash, TorrentEntry>>> {
        self.shards[shard as usize].clone()
    }

    #[tracing::instrument(level = "debug")]
    #[inline(always)]
    pub fn contains_torrent(&self, info_hash: InfoHash) -> bool {
        self.shards[info_hash.0[0] as usize]
            .read()
            .contains_key(&info_hash)
    }

    #[tracing::instrument(level = "debug")]
    pub fn get_torrent(&self, info_hash: InfoHash) -> Option<TorrentEntry> {
        self.shards[info_hash.0[0] as usize]
            .read()
            .get(&info_hash)
            .cloned()
    }

    #[tracing::instrument(level = "debug")]
    pub fn get_torrents_amount(&self) -> u64 {
        self.shards.iter()
            .map(|shard| shard.read().len() as u64)
            .sum()
    }

    /// Seeder and leecher totals across every shard.
    #[tracing::instrument(level = "debug")]
    pub fn get_peers_amount(&self) -> (u64, u64) {
        let mut seeds = 0u64;
        let mut peers = 0u64;
        for shard in &self.shards {
            let shard_data = shard.read();
            for torrent_entry in shard_data.values() {
                seeds += torrent_entry.seeds.len() as u64;
                peers += torrent_entry.peers.len() as u64;
            }
        }
        (seeds, peers)
    }

    pub fn iter_all_torrents<F>(&self, mut f: F)
    where
        F: FnMut(&InfoHash, &TorrentEntry)
    {
        for shard in &self.shards {
            let shard_data = shard.read();
            for (k, v) in shard_data.iter() {
                f(k, v);
            }
        }
    }
}
