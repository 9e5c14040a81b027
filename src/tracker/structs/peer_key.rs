use crate::tracker::structs::peer_id::PeerId;

/// Identity of a peer within one swarm.
///
/// Keyed on `(user_id, peer_id)` rather than the peer id alone, so several
/// users announcing from the same client installation do not collide.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PeerKey {
    pub user_id: u64,
    pub peer_id: PeerId,
}
