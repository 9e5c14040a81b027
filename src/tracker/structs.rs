pub mod announce_query_request;
pub mod announce_result;
pub mod info_hash;
pub mod passkey;
pub mod peer_id;
pub mod peer_key;
pub mod scrape_query_request;
pub mod snatch_delta;
pub mod sync_channels;
pub mod torrent_delta;
pub mod torrent_entry;
pub mod torrent_peer;
pub mod torrent_sharding;
pub mod torrent_tracker;
pub mod transfer_ip_delta;
pub mod user_delta;
pub mod user_entry_item;
