// Common test utilities and fixtures
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64};
use rand::RngCore;
use tempfile::TempDir;
use gazelle_actix::config::structs::configuration::Configuration;
use gazelle_actix::tracker::enums::announce_event::AnnounceEvent;
use gazelle_actix::tracker::enums::torrent_status::TorrentStatus;
use gazelle_actix::tracker::structs::announce_query_request::AnnounceQueryRequest;
use gazelle_actix::tracker::structs::info_hash::InfoHash;
use gazelle_actix::tracker::structs::passkey::PassKey;
use gazelle_actix::tracker::structs::peer_id::PeerId;
use gazelle_actix::tracker::structs::torrent_entry::TorrentEntry;
use gazelle_actix::tracker::structs::torrent_tracker::TorrentTracker;
use gazelle_actix::tracker::structs::user_entry_item::UserEntryItem;

/// Create a test configuration backed by an SQLite database in `directory`.
pub fn create_test_config(directory: &TempDir) -> Configuration {
    let mut config = Configuration::init();
    config.log_level = String::from("off");
    config.database.path = format!("sqlite://{}/data.db", directory.path().display());
    config.http_server = vec![];
    config
}

pub async fn create_test_tracker(config: Configuration) -> Arc<TorrentTracker> {
    Arc::new(TorrentTracker::new(Arc::new(config), true).await)
}

pub fn random_info_hash() -> InfoHash {
    let mut data = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut data);
    InfoHash(data)
}

pub fn random_peer_id() -> PeerId {
    let mut data = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut data);
    data[..8].copy_from_slice(b"-qB4500-");
    PeerId(data)
}

pub fn make_user(user_id: u64, passkey: &str) -> UserEntryItem {
    UserEntryItem {
        user_id,
        passkey: passkey.parse().unwrap(),
        enabled: true,
        slots: -1,
        torrents_limit: 0,
        uploaded: AtomicU64::new(0),
        downloaded: AtomicU64::new(0),
        slots_used: AtomicI64::new(0),
        swarms_used: AtomicI64::new(0),
    }
}

pub fn make_torrent(torrent_id: u64, status: TorrentStatus) -> TorrentEntry {
    TorrentEntry {
        torrent_id,
        status,
        snatched: 0,
        updated: 0,
        seeds: Default::default(),
        peers: Default::default(),
    }
}

/// Replaces the tracker's user set with the given users.
pub fn seed_users(tracker: &Arc<TorrentTracker>, users: Vec<UserEntryItem>) {
    let mut snapshot: BTreeMap<PassKey, UserEntryItem> = BTreeMap::new();
    for user in users {
        snapshot.insert(user.passkey, user);
    }
    tracker.reload_users(snapshot);
}

/// Replaces the tracker's torrent set with the given torrents.
pub fn seed_torrents(tracker: &Arc<TorrentTracker>, torrents: Vec<(InfoHash, TorrentEntry)>) {
    let snapshot: BTreeMap<InfoHash, TorrentEntry> = torrents.into_iter().collect();
    tracker.reload_torrents(snapshot);
}

pub fn announce_request(info_hash: InfoHash, peer_id: PeerId, left: u64, event: AnnounceEvent) -> AnnounceQueryRequest {
    AnnounceQueryRequest {
        info_hash,
        peer_id,
        port: 51413,
        uploaded: 0,
        downloaded: 0,
        left,
        compact: true,
        no_peer_id: false,
        event,
        remote_addr: Ipv4Addr::new(127, 0, 0, 1),
        numwant: 50,
    }
}
