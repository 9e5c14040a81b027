use std::net::SocketAddrV4;
use crate::tracker::structs::peer_id::PeerId;

/// Outcome of a handled announce, ready for response encoding.
#[derive(Clone, Debug)]
pub struct AnnounceResult {
    /// Seeder count after the announce was applied.
    pub complete: u64,
    /// Leecher count after the announce was applied.
    pub incomplete: u64,
    /// Selected peers, never including the requester.
    pub peers: Vec<(SocketAddrV4, PeerId)>,
}
