mod common;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use gazelle_actix::tracker::enums::announce_event::AnnounceEvent;
use gazelle_actix::tracker::enums::torrent_status::TorrentStatus;
use gazelle_actix::tracker::structs::peer_key::PeerKey;
use gazelle_actix::tracker::structs::user_entry_item::UserEntryItem;

#[tokio::test]
async fn test_first_announce_creates_leecher() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);

    let announce = common::announce_request(info_hash, common::random_peer_id(), 1000, AnnounceEvent::Started);
    let result = tracker.handle_announce(&user, &announce).unwrap();

    assert_eq!(result.complete, 0, "No seeders yet");
    assert_eq!(result.incomplete, 1, "The announcing leecher is counted");
    assert!(result.peers.is_empty(), "A lone peer gets an empty peer list");
    assert_eq!(user.swarms_used.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_announce_unknown_torrent_fails() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));

    let announce = common::announce_request(common::random_info_hash(), common::random_peer_id(), 1000, AnnounceEvent::Started);
    let error = tracker.handle_announce(&user, &announce).unwrap_err();
    assert_eq!(error.message, "This torrent does not exist");
}

#[tokio::test]
async fn test_announce_deleted_torrent_fails() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Deleted))]);

    let announce = common::announce_request(info_hash, common::random_peer_id(), 1000, AnnounceEvent::Started);
    let error = tracker.handle_announce(&user, &announce).unwrap_err();
    assert_eq!(error.message, "This torrent has been deleted");
}

#[tokio::test]
async fn test_peer_moves_between_categories_exclusively() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let peer_id = common::random_peer_id();
    let peer_key = PeerKey { user_id: 1, peer_id };

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Started)).unwrap();
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert!(torrent_entry.peers.contains_key(&peer_key));
    assert!(!torrent_entry.seeds.contains_key(&peer_key));

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 0, AnnounceEvent::None)).unwrap();
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert!(!torrent_entry.peers.contains_key(&peer_key), "Peer left the leecher table");
    assert!(torrent_entry.seeds.contains_key(&peer_key), "Peer arrived in the seeder table");

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 500, AnnounceEvent::None)).unwrap();
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert!(torrent_entry.peers.contains_key(&peer_key), "Seeder with remaining bytes is a leecher again");
    assert!(!torrent_entry.seeds.contains_key(&peer_key));
}

#[tokio::test]
async fn test_stopped_announce_is_idempotent() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let peer_id = common::random_peer_id();

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Started)).unwrap();
    let first_stop = tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Stopped)).unwrap();
    let second_stop = tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Stopped)).unwrap();

    assert_eq!(first_stop.complete, second_stop.complete);
    assert_eq!(first_stop.incomplete, second_stop.incomplete);
    assert_eq!(user.swarms_used.load(Ordering::Relaxed), 0, "No negative swarm counter after a double stop");
    assert_eq!(user.slots_used.load(Ordering::Relaxed), 0, "No negative slot counter after a double stop");
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert!(torrent_entry.seeds.is_empty());
    assert!(torrent_entry.peers.is_empty());
}

#[tokio::test]
async fn test_user_totals_are_monotone() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let peer_id = common::random_peer_id();

    let mut previous_uploaded = 0;
    for (uploaded, downloaded) in [(0u64, 0u64), (1000, 400), (500, 200), (2000, 800)] {
        let mut announce = common::announce_request(info_hash, peer_id, 100, AnnounceEvent::None);
        announce.uploaded = uploaded;
        announce.downloaded = downloaded;
        tracker.handle_announce(&user, &announce).unwrap();

        let current_uploaded = user.uploaded.load(Ordering::Relaxed);
        assert!(current_uploaded >= previous_uploaded, "User upload total decreased");
        previous_uploaded = current_uploaded;
    }
    // 0 -> 1000, 1000 -> 500 clamps to zero, 500 -> 2000 adds 1500.
    assert_eq!(user.uploaded.load(Ordering::Relaxed), 2500);
    assert_eq!(user.downloaded.load(Ordering::Relaxed), 1000);
}

#[tokio::test]
async fn test_completed_increments_snatched_and_queues_delta() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let peer_id = common::random_peer_id();
    let peer_key = PeerKey { user_id: 1, peer_id };

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Started)).unwrap();
    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 0, AnnounceEvent::Completed)).unwrap();

    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert_eq!(torrent_entry.snatched, 1, "Completion counted exactly once");
    assert!(torrent_entry.seeds.contains_key(&peer_key), "Completed peer is now a seeder");

    let snatch = tracker.sync.snatches_rx.lock().await.try_recv().unwrap();
    assert_eq!(snatch.user_id, 1);
    assert_eq!(snatch.torrent_id, 10);

    // A repeated completed from the now-seeding peer does not re-count.
    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 0, AnnounceEvent::Completed)).unwrap();
    assert_eq!(tracker.get_torrent(info_hash).unwrap().snatched, 1);
    assert!(tracker.sync.snatches_rx.lock().await.try_recv().is_err(), "No second snatch queued");
}

#[tokio::test]
async fn test_leech_slots_are_enforced() {
    let directory = tempfile::tempdir().unwrap();
    let mut config = common::create_test_config(&directory);
    config.tracker_config.slots_enabled = true;
    let tracker = common::create_test_tracker(config).await;
    let user = Arc::new(UserEntryItem { slots: 1, ..common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa") });
    let first_hash = common::random_info_hash();
    let second_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![
        (first_hash, common::make_torrent(10, TorrentStatus::Active)),
        (second_hash, common::make_torrent(11, TorrentStatus::Active)),
    ]);

    tracker.handle_announce(&user, &common::announce_request(first_hash, common::random_peer_id(), 1000, AnnounceEvent::Started)).unwrap();
    let error = tracker.handle_announce(&user, &common::announce_request(second_hash, common::random_peer_id(), 1000, AnnounceEvent::Started)).unwrap_err();
    assert_eq!(error.message, "You have no leech slots left");

    // Seeding is not limited by leech slots.
    tracker.handle_announce(&user, &common::announce_request(second_hash, common::random_peer_id(), 0, AnnounceEvent::None)).unwrap();
}

#[tokio::test]
async fn test_peer_list_excludes_requester_and_honours_numwant() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);

    for index in 0..10u64 {
        let seeder = Arc::new(common::make_user(100 + index, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
        let mut announce = common::announce_request(info_hash, common::random_peer_id(), 0, AnnounceEvent::None);
        announce.remote_addr = Ipv4Addr::new(10, 0, 0, index as u8 + 1);
        tracker.handle_announce(&seeder, &announce).unwrap();
    }

    let leecher = Arc::new(common::make_user(1, "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"));
    let mut announce = common::announce_request(info_hash, common::random_peer_id(), 1000, AnnounceEvent::Started);
    announce.numwant = 4;
    let result = tracker.handle_announce(&leecher, &announce).unwrap();

    assert_eq!(result.complete, 10);
    assert_eq!(result.incomplete, 1);
    assert_eq!(result.peers.len(), 4, "numwant caps the peer list");
    for (peer_addr, _) in result.peers.iter() {
        assert_ne!(*peer_addr.ip(), Ipv4Addr::new(127, 0, 0, 1), "Requester never appears in its own peer list");
    }
}

#[tokio::test]
async fn test_reload_preserves_live_peers() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    tracker.handle_announce(&user, &common::announce_request(info_hash, common::random_peer_id(), 1000, AnnounceEvent::Started)).unwrap();

    // The same canonical snapshot arrives again: swarms must survive.
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert_eq!(torrent_entry.peers.len(), 1, "Reload kept the live leecher");

    // A snapshot without the torrent drops it and its swarm.
    common::seed_torrents(&tracker, vec![]);
    assert!(tracker.get_torrent(info_hash).is_none());
}

#[tokio::test]
async fn test_clean_peers_reaps_stale_sessions() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    common::seed_users(&tracker, vec![common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")]);
    let user = tracker.get_user(&"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap()).unwrap();
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Active))]);
    let peer_id = common::random_peer_id();
    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Started)).unwrap();

    {
        let shard = tracker.torrents_sharding.get_shard(info_hash.0[0]);
        let mut lock = shard.write();
        let torrent_entry = lock.get_mut(&info_hash).unwrap();
        for torrent_peer in torrent_entry.peers.values_mut() {
            torrent_peer.updated -= 10000;
        }
    }

    tracker.clean_peers(std::time::Duration::from_secs(2700));
    let torrent_entry = tracker.get_torrent(info_hash).unwrap();
    assert!(torrent_entry.peers.is_empty(), "Stale peer was reaped");

    tracker.verify_slots().await;
    assert_eq!(user.slots_used.load(Ordering::Relaxed), 0, "Slot sweep repaired the counter");
    assert_eq!(user.swarms_used.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_scrape_reports_known_hashes_only() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let known = common::random_info_hash();
    let unknown = common::random_info_hash();
    let mut torrent_entry = common::make_torrent(10, TorrentStatus::Active);
    torrent_entry.snatched = 5;
    common::seed_torrents(&tracker, vec![(known, torrent_entry)]);

    let scrape = gazelle_actix::tracker::structs::scrape_query_request::ScrapeQueryRequest {
        info_hashes: vec![known, unknown],
    };
    let files = tracker.handle_scrape(&scrape);
    assert_eq!(files.len(), 1, "Unknown hashes are omitted");
    assert_eq!(files.get(&known).copied(), Some((0, 5, 0)));
}

#[tokio::test]
async fn test_disabled_user_and_pending_torrent_contribute_no_deltas() {
    let directory = tempfile::tempdir().unwrap();
    let tracker = common::create_test_tracker(common::create_test_config(&directory)).await;
    let user = Arc::new(common::make_user(1, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let info_hash = common::random_info_hash();
    common::seed_torrents(&tracker, vec![(info_hash, common::make_torrent(10, TorrentStatus::Pending))]);
    let peer_id = common::random_peer_id();

    tracker.handle_announce(&user, &common::announce_request(info_hash, peer_id, 1000, AnnounceEvent::Started)).unwrap();
    let mut announce = common::announce_request(info_hash, peer_id, 500, AnnounceEvent::None);
    announce.uploaded = 5000;
    announce.downloaded = 500;
    tracker.handle_announce(&user, &announce).unwrap();

    assert_eq!(user.uploaded.load(Ordering::Relaxed), 0, "Pending torrents earn no traffic");
    assert!(tracker.sync.users_rx.lock().await.try_recv().is_err(), "No user delta queued");
}
