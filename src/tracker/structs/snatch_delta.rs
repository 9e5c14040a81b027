/// One completed download, appended to the transfer history table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnatchDelta {
    pub user_id: u64,
    pub torrent_id: u64,
    pub completed_at: u64,
}
