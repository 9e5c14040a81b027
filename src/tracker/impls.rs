pub mod info_hash;
pub mod passkey;
pub mod peer_id;
pub mod torrent_sharding;
pub mod torrent_status;
pub mod torrent_tracker;
pub mod torrent_tracker_handlers;
pub mod torrent_tracker_peers;
pub mod torrent_tracker_sync;
pub mod torrent_tracker_torrents;
pub mod torrent_tracker_users;
