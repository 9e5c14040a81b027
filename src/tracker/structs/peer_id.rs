//! BitTorrent peer identifier.

/// A 20-byte self-chosen client identifier.
///
/// The first bytes carry the client name and version in the Azureus-style
/// convention (`-qB4500-`…), which is what the client whitelist matches on.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct PeerId(pub [u8; 20]);
