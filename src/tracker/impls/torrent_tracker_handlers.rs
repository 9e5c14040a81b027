use std::collections::{BTreeMap, HashMap};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use log::debug;
use rand::seq::SliceRandom;
use crate::common::common::{current_time, QueryValues};
use crate::common::structs::custom_error::CustomError;
use crate::record::structs::snatch_record::SnatchRecord;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::enums::announce_event::AnnounceEvent;
use crate::tracker::enums::torrent_status::TorrentStatus;
use crate::tracker::structs::announce_query_request::AnnounceQueryRequest;
use crate::tracker::structs::announce_result::AnnounceResult;
use crate::tracker::structs::info_hash::InfoHash;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::peer_key::PeerKey;
use crate::tracker::structs::scrape_query_request::ScrapeQueryRequest;
use crate::tracker::structs::snatch_delta::SnatchDelta;
use crate::tracker::structs::torrent_delta::TorrentDelta;
use crate::tracker::structs::torrent_entry::AHashMap;
use crate::tracker::structs::torrent_peer::TorrentPeer;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::tracker::structs::transfer_ip_delta::TransferIpDelta;
use crate::tracker::structs::user_delta::UserDelta;
use crate::tracker::structs::user_entry_item::UserEntryItem;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub fn validate_announce(&self, remote_addr: Ipv4Addr, query: &HashMap<String, QueryValues>) -> Result<AnnounceQueryRequest, CustomError>
    {
        #[inline]
        fn get_required_bytes<'a>(query: &'a HashMap<String, QueryValues>, field: &str, expected_len: Option<usize>) -> Result<&'a [u8], CustomError> {
            let value = query.get(field)
                .ok_or_else(|| CustomError::new(&format!("missing {field}")))?
                .last()
                .ok_or_else(|| CustomError::new(&format!("no {field} given")))?;
            if let Some(len) = expected_len {
                if value.len() != len {
                    return Err(CustomError::new(&format!("invalid {field} size")));
                }
            }
            Ok(value.as_slice())
        }

        #[inline]
        fn parse_integer<T: std::str::FromStr>(query: &HashMap<String, QueryValues>, field: &str) -> Result<T, CustomError> {
            let bytes = get_required_bytes(query, field, None)?;
            let str_value = std::str::from_utf8(bytes)
                .map_err(|_| CustomError::new(&format!("invalid {field}")))?;
            str_value.parse::<T>()
                .map_err(|_| CustomError::new(&format!("missing or invalid {field}")))
        }

        let info_hash_bytes = get_required_bytes(query, "info_hash", Some(20))?;
        let peer_id_bytes = get_required_bytes(query, "peer_id", Some(20))?;
        let info_hash = InfoHash::from(info_hash_bytes);
        let peer_id = PeerId::from(peer_id_bytes);
        let port_integer = parse_integer::<u16>(query, "port")?;
        let uploaded_integer = parse_integer::<u64>(query, "uploaded")?;
        let downloaded_integer = parse_integer::<u64>(query, "downloaded")?;
        let left_integer = parse_integer::<u64>(query, "left")?;
        let compact_bool = query.get("compact")
            .and_then(|values| values.last())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|value| value.parse::<u8>().ok())
            .map(|value| value != 0)
            .unwrap_or(true);
        let event_integer = query.get("event")
            .and_then(|values| values.last())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .map(|value| match value.to_lowercase().as_str() {
                "started" => AnnounceEvent::Started,
                "stopped" => AnnounceEvent::Stopped,
                "completed" => AnnounceEvent::Completed,
                _ => AnnounceEvent::None,
            })
            .unwrap_or(AnnounceEvent::None);
        let no_peer_id_bool = query.contains_key("no_peer_id");
        let peers_returned = self.config.tracker_config.peers_returned;
        let numwant_integer = query.get("numwant")
            .and_then(|values| values.last())
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(|value| if value == 0 || value > peers_returned { peers_returned } else { value })
            .unwrap_or(peers_returned);
        Ok(AnnounceQueryRequest {
            info_hash,
            peer_id,
            port: port_integer,
            uploaded: uploaded_integer,
            downloaded: downloaded_integer,
            left: left_integer,
            compact: compact_bool,
            no_peer_id: no_peer_id_bool,
            event: event_integer,
            remote_addr,
            numwant: numwant_integer,
        })
    }

    /// Applies one announce to the swarm under the torrent's shard lock and
    /// returns the data needed to encode the response.
    ///
    /// Every state transition of the peer happens here: creation, the
    /// leecher/seeder move when `left` crosses zero, removal on `stopped`,
    /// and snatch counting on `completed`. Traffic deltas are diffed against
    /// the previous report of the same `(user, peer)` session and handed to
    /// the sync workers after the lock is released.
    #[tracing::instrument(level = "debug")]
    pub fn handle_announce(&self, user: &Arc<UserEntryItem>, announce: &AnnounceQueryRequest) -> Result<AnnounceResult, CustomError>
    {
        let now = current_time();
        let tracker_config = &self.config.tracker_config;
        let shard = self.torrents_sharding.get_shard(announce.info_hash.0[0]);
        let mut lock = shard.write();

        let torrent_entry = match lock.get_mut(&announce.info_hash) {
            None => return Err(CustomError::new("This torrent does not exist")),
            Some(entry) => entry,
        };
        if torrent_entry.status == TorrentStatus::Deleted {
            return Err(CustomError::new("This torrent has been deleted"));
        }

        let peer_key = PeerKey { user_id: user.user_id, peer_id: announce.peer_id };
        let previous = torrent_entry.seeds.remove(&peer_key)
            .or_else(|| torrent_entry.peers.remove(&peer_key));
        let was_seeding = previous.as_ref().map(|torrent_peer| torrent_peer.seeding);
        let seeding = announce.left == 0;

        if previous.is_none() && announce.event != AnnounceEvent::Stopped {
            if user.torrents_limit > 0 && user.swarms_used.load(Ordering::Relaxed) >= user.torrents_limit as i64 {
                return Err(CustomError::new("You have reached your active torrents limit"));
            }
            if !seeding && tracker_config.slots_enabled && user.slots != -1
                && user.slots_used.load(Ordering::Relaxed) >= user.slots {
                return Err(CustomError::new("You have no leech slots left"));
            }
        }

        let (mut uploaded_delta, mut downloaded_delta) = match &previous {
            Some(torrent_peer) if announce.event != AnnounceEvent::Started => (
                announce.uploaded.saturating_sub(torrent_peer.uploaded),
                announce.downloaded.saturating_sub(torrent_peer.downloaded),
            ),
            _ => (0, 0),
        };
        if !user.enabled || torrent_entry.status != TorrentStatus::Active {
            uploaded_delta = 0;
            downloaded_delta = 0;
        }

        let mut snatched = false;
        let result = match announce.event {
            AnnounceEvent::Stopped => {
                debug!("[HANDLE ANNOUNCE] Removing from torrent {} peer {}", announce.info_hash, announce.peer_id);
                match was_seeding {
                    Some(true) => { self.update_stats(StatsEvent::Seeds, -1); }
                    Some(false) => {
                        self.update_stats(StatsEvent::Peers, -1);
                        user.slots_used.fetch_sub(1, Ordering::Relaxed);
                    }
                    None => {}
                }
                if was_seeding.is_some() {
                    user.swarms_used.fetch_sub(1, Ordering::Relaxed);
                }
                torrent_entry.updated = now;
                AnnounceResult {
                    complete: torrent_entry.seeds.len() as u64,
                    incomplete: torrent_entry.peers.len() as u64,
                    peers: Vec::new(),
                }
            }
            _ => {
                debug!("[HANDLE ANNOUNCE] Updating in torrent {} peer {}", announce.info_hash, announce.peer_id);
                if announce.event == AnnounceEvent::Completed && seeding && was_seeding == Some(false) {
                    torrent_entry.snatched += 1;
                    snatched = true;
                    self.update_stats(StatsEvent::Completed, 1);
                }

                match was_seeding {
                    None => {
                        if seeding {
                            self.update_stats(StatsEvent::Seeds, 1);
                        } else {
                            self.update_stats(StatsEvent::Peers, 1);
                            user.slots_used.fetch_add(1, Ordering::Relaxed);
                        }
                        user.swarms_used.fetch_add(1, Ordering::Relaxed);
                    }
                    Some(true) if !seeding => {
                        self.update_stats(StatsEvent::Seeds, -1);
                        self.update_stats(StatsEvent::Peers, 1);
                        user.slots_used.fetch_add(1, Ordering::Relaxed);
                    }
                    Some(false) if seeding => {
                        self.update_stats(StatsEvent::Peers, -1);
                        self.update_stats(StatsEvent::Seeds, 1);
                        user.slots_used.fetch_sub(1, Ordering::Relaxed);
                    }
                    _ => {}
                }

                let torrent_peer = TorrentPeer {
                    peer_id: announce.peer_id,
                    peer_addr: SocketAddrV4::new(announce.remote_addr, announce.port),
                    uploaded: announce.uploaded,
                    downloaded: announce.downloaded,
                    left: announce.left,
                    seeding,
                    updated: now,
                    started: match &previous {
                        Some(torrent_peer) if announce.event != AnnounceEvent::Started => torrent_peer.started,
                        _ => now,
                    },
                };
                if seeding {
                    torrent_entry.seeds.insert(peer_key, torrent_peer);
                } else {
                    torrent_entry.peers.insert(peer_key, torrent_peer);
                }
                torrent_entry.updated = now;

                let want = announce.numwant as usize;
                let mut selected: Vec<(SocketAddrV4, PeerId)> = Vec::with_capacity(want);
                if seeding {
                    pick_peers(&torrent_entry.peers, &peer_key, want, &mut selected);
                    pick_peers(&torrent_entry.seeds, &peer_key, want.saturating_sub(selected.len()), &mut selected);
                } else {
                    pick_peers(&torrent_entry.seeds, &peer_key, want, &mut selected);
                    pick_peers(&torrent_entry.peers, &peer_key, want.saturating_sub(selected.len()), &mut selected);
                }

                AnnounceResult {
                    complete: torrent_entry.seeds.len() as u64,
                    incomplete: torrent_entry.peers.len() as u64,
                    peers: selected,
                }
            }
        };

        let torrent_id = torrent_entry.torrent_id;
        let session_started = previous.as_ref().map(|torrent_peer| torrent_peer.started).unwrap_or(now);
        drop(lock);

        if uploaded_delta > 0 || downloaded_delta > 0 {
            user.uploaded.fetch_add(uploaded_delta, Ordering::Relaxed);
            user.downloaded.fetch_add(downloaded_delta, Ordering::Relaxed);
            self.queue_user_delta(UserDelta {
                user_id: user.user_id,
                uploaded_delta,
                downloaded_delta,
            });
        }

        self.queue_torrent_delta(TorrentDelta {
            torrent_id,
            snatched_delta: snatched as u64,
            last_action: now,
        });

        if snatched {
            self.queue_snatch_delta(SnatchDelta {
                user_id: user.user_id,
                torrent_id,
                completed_at: now,
            });
            if tracker_config.record_enabled {
                let _ = self.sync.records_tx.send(SnatchRecord {
                    user_id: user.user_id,
                    torrent_id,
                    ip: announce.remote_addr,
                    port: announce.port,
                    completed_at: now,
                });
            }
        }

        if tracker_config.transfer_ips_enabled
            && (announce.event == AnnounceEvent::Stopped || announce.event == AnnounceEvent::Completed) {
            self.queue_transfer_ip_delta(TransferIpDelta {
                user_id: user.user_id,
                torrent_id,
                ip: announce.remote_addr,
                port: announce.port,
                uploaded: announce.uploaded,
                downloaded: announce.downloaded,
                started: session_started,
                updated: now,
            });
        }

        Ok(result)
    }

    #[tracing::instrument(level = "debug")]
    pub fn validate_scrape(&self, query: &HashMap<String, QueryValues>) -> Result<ScrapeQueryRequest, CustomError>
    {
        match query.get("info_hash") {
            None => Err(CustomError::new("missing info_hash")),
            Some(result) => {
                if result.is_empty() {
                    return Err(CustomError::new("no info_hash given"));
                }
                let mut info_hash_vec = Vec::with_capacity(result.len());
                for hash in result.iter() {
                    if hash.len() != 20 {
                        return Err(CustomError::new("an invalid info_hash was given"));
                    }
                    info_hash_vec.push(InfoHash::from(hash.as_slice()));
                }
                Ok(ScrapeQueryRequest { info_hashes: info_hash_vec })
            }
        }
    }

    /// Read-only swarm summary. Unknown hashes are left out of the result.
    #[tracing::instrument(level = "debug")]
    pub fn handle_scrape(&self, scrape: &ScrapeQueryRequest) -> BTreeMap<InfoHash, (u64, u64, u64)>
    {
        let mut result = BTreeMap::new();
        for info_hash in scrape.info_hashes.iter() {
            let shard = self.torrents_sharding.get_shard(info_hash.0[0]);
            let lock = shard.read();
            if let Some(torrent_entry) = lock.get(info_hash) {
                result.insert(*info_hash, (
                    torrent_entry.seeds.len() as u64,
                    torrent_entry.snatched,
                    torrent_entry.peers.len() as u64,
                ));
            }
        }
        result
    }
}

#[inline]
fn pick_peers(table: &AHashMap<PeerKey, TorrentPeer>, exclude: &PeerKey, amount: usize, selected: &mut Vec<(SocketAddrV4, PeerId)>)
{
    if amount == 0 {
        return;
    }
    let candidates: Vec<&TorrentPeer> = table.iter()
        .filter(|(peer_key, _)| *peer_key != exclude)
        .map(|(_, torrent_peer)| torrent_peer)
        .collect();
    if candidates.len() <= amount {
        selected.extend(candidates.into_iter().map(|torrent_peer| (torrent_peer.peer_addr, torrent_peer.peer_id)));
    } else {
        let mut rng = rand::thread_rng();
        selected.extend(
            candidates.choose_multiple(&mut rng, amount)
                .map(|torrent_peer| (torrent_peer.peer_addr, torrent_peer.peer_id))
        );
    }
}
