use std::collections::HashMap;
use crate::tracker::enums::torrent_status::TorrentStatus;
use crate::tracker::structs::peer_key::PeerKey;
use crate::tracker::structs::torrent_peer::TorrentPeer;

pub type AHashMap<K, V> = HashMap<K, V, ahash::RandomState>;

/// A registered torrent with its live swarm.
///
/// Canonical fields (`torrent_id`, `status`, `snatched`) come from the
/// database and survive reloads; the peer tables are transient and live only
/// in memory. A `PeerKey` appears in at most one of `seeds`/`peers`.
#[derive(Debug, Clone)]
pub struct TorrentEntry {
    pub torrent_id: u64,
    pub status: TorrentStatus,
    pub snatched: u64,
    /// Unix timestamp of the last announce against this torrent.
    pub updated: u64,
    pub seeds: AHashMap<PeerKey, TorrentPeer>,
    pub peers: AHashMap<PeerKey, TorrentPeer>,
}
