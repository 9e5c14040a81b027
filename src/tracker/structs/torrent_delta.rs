/// Dirty-torrent marker: snatch increments plus the newest last-action
/// timestamp. The sync worker coalesces these per torrent before flushing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TorrentDelta {
    pub torrent_id: u64,
    pub snatched_delta: u64,
    pub last_action: u64,
}
