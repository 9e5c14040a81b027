use std::net::SocketAddrV4;
use serde::Serialize;
use crate::tracker::structs::peer_id::PeerId;

/// One peer's session within a swarm.
///
/// `uploaded`/`downloaded`/`left` are the raw counters as last reported by
/// the client for this session; the announce engine diffs consecutive
/// reports to produce the user's traffic deltas.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct TorrentPeer {
    pub peer_id: PeerId,
    pub peer_addr: SocketAddrV4,
    pub uploaded: u64,
    pub downloaded: u64,
    pub left: u64,
    pub seeding: bool,
    /// Unix timestamp of the last announce.
    pub updated: u64,
    /// Unix timestamp of the session start.
    pub started: u64,
}
