use std::time::Duration;
use log::info;
use crate::common::common::current_time;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::peer_key::PeerKey;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    /// Removes peers that have not announced within `peer_timeout`.
    ///
    /// Scans each shard under the read lock first and only takes the write
    /// lock for shards that actually contain expired peers. Slot counters are
    /// not touched here; the periodic slot sweep recomputes them from the
    /// swarms.
    #[tracing::instrument(level = "debug")]
    pub fn clean_peers(&self, peer_timeout: Duration)
    {
        let cutoff = current_time().saturating_sub(peer_timeout.as_secs());
        let mut seeds_removed = 0u64;
        let mut peers_removed = 0u64;

        for shard in 0u8..=255u8 {
            let shard_arc = self.torrents_sharding.get_shard(shard);

            let expired: Vec<(InfoHash, Vec<PeerKey>, Vec<PeerKey>)> = {
                let shard_read = shard_arc.read();
                if shard_read.is_empty() {
                    continue;
                }
                let mut expired_in_shard = Vec::new();
                for (info_hash, torrent_entry) in shard_read.iter() {
                    let expired_seeds: Vec<PeerKey> = torrent_entry.seeds.iter()
                        .filter(|(_, torrent_peer)| torrent_peer.updated < cutoff)
                        .map(|(peer_key, _)| *peer_key)
                        .collect();
                    let expired_peers: Vec<PeerKey> = torrent_entry.peers.iter()
                        .filter(|(_, torrent_peer)| torrent_peer.updated < cutoff)
                        .map(|(peer_key, _)| *peer_key)
                        .collect();
                    if !expired_seeds.is_empty() || !expired_peers.is_empty() {
                        expired_in_shard.push((*info_hash, expired_seeds, expired_peers));
                    }
                }
                expired_in_shard
            };

            if expired.is_empty() {
                continue;
            }

            let mut shard_write = shard_arc.write();
            for (info_hash, expired_seeds, expired_peers) in expired {
                if let Some(torrent_entry) = shard_write.get_mut(&info_hash) {
                    for peer_key in expired_seeds {
                        // Re-check under the write lock, the peer may have
                        // announced between the two passes.
                        if torrent_entry.seeds.get(&peer_key).is_some_and(|torrent_peer| torrent_peer.updated < cutoff)
                            && torrent_entry.seeds.remove(&peer_key).is_some() {
                            seeds_removed += 1;
                        }
                    }
                    for peer_key in expired_peers {
                        if torrent_entry.peers.get(&peer_key).is_some_and(|torrent_peer| torrent_peer.updated < cutoff)
                            && torrent_entry.peers.remove(&peer_key).is_some() {
                            peers_removed += 1;
                        }
                    }
                }
            }
        }

        if seeds_removed > 0 {
            self.update_stats(StatsEvent::Seeds, -(seeds_removed as i64));
        }
        if peers_removed > 0 {
            self.update_stats(StatsEvent::Peers, -(peers_removed as i64));
        }
        info!("[PEERS] Removed {seeds_removed} seeds and {peers_removed} peers past their timeout");
    }
}
