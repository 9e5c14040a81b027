use std::collections::BTreeMap;
use std::sync::Arc;
use log::info;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::torrent_entry::TorrentEntry;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub fn get_torrent(&self, info_hash: InfoHash) -> Option<TorrentEntry>
    {
        self.torrents_sharding.get_torrent(info_hash)
    }

    #[tracing::instrument(level = "debug")]
    pub fn get_torrents_amount(&self) -> u64
    {
        self.torrents_sharding.get_torrents_amount()
    }

    /// Replaces the torrent set with a freshly loaded snapshot.
    ///
    /// Peers are transient and not part of the canonical store, so the live
    /// peer tables of torrents that survive the reload are carried over;
    /// torrents absent from the snapshot are dropped together with their
    /// swarms.
    #[tracing::instrument(level = "debug", skip(snapshot))]
    pub fn reload_torrents(&self, snapshot: BTreeMap<InfoHash, TorrentEntry>) -> u64
    {
        let torrents_count = snapshot.len() as u64;

        let mut sharded: [BTreeMap<InfoHash, TorrentEntry>; 256] = std::array::from_fn(|_| BTreeMap::new());
        for (info_hash, torrent_entry) in snapshot {
            sharded[info_hash.0[0] as usize].insert(info_hash, torrent_entry);
        }

        for (shard, incoming) in sharded.into_iter().enumerate() {
            let shard_arc = self.torrents_sharding.get_shard(shard as u8);
            let mut lock = shard_arc.write();
            let mut previous = std::mem::take(&mut *lock);
            let mut replaced = incoming;
            for (info_hash, torrent_entry) in replaced.iter_mut() {
                if let Some(previous_entry) = previous.remove(info_hash) {
                    torrent_entry.seeds = previous_entry.seeds;
                    torrent_entry.peers = previous_entry.peers;
                    if previous_entry.updated > torrent_entry.updated {
                        torrent_entry.updated = previous_entry.updated;
                    }
                }
            }
            *lock = replaced;
        }

        let (seeds_count, peers_count) = self.torrents_sharding.get_peers_amount();
        self.set_stats(StatsEvent::Torrents, torrents_count as i64);
        self.set_stats(StatsEvent::Seeds, seeds_count as i64);
        self.set_stats(StatsEvent::Peers, peers_count as i64);
        torrents_count
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_torrents(&self, tracker: Arc<TorrentTracker>)
    {
        if let Ok(torrents) = self.sqlx.load_torrents(tracker).await {
            info!("[RELOAD] Loaded {torrents} torrents");
        }
    }
}
