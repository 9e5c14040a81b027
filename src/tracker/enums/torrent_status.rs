use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered torrent.
///
/// Deleted torrents stay in memory so announces against them can be answered
/// with a proper failure instead of "does not exist".
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum TorrentStatus {
    Pending = 0,
    Active = 1,
    Deleted = 2
}
