use crate::tracker::enums::torrent_status::TorrentStatus;

impl From<u8> for TorrentStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => TorrentStatus::Active,
            2 => TorrentStatus::Deleted,
            _ => TorrentStatus::Pending,
        }
    }
}

impl TorrentStatus {
    pub fn as_u8(&self) -> u8 {
        match self {
            TorrentStatus::Pending => 0,
            TorrentStatus::Active => 1,
            TorrentStatus::Deleted => 2,
        }
    }
}
