#[cfg(test)]
mod database_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use crate::config::structs::configuration::Configuration;
    use crate::tracker::enums::torrent_status::TorrentStatus;
    use crate::tracker::structs::torrent_delta::TorrentDelta;
    use crate::tracker::structs::torrent_tracker::TorrentTracker;
    use crate::tracker::structs::user_delta::UserDelta;

    async fn create_test_tracker(directory: &tempfile::TempDir) -> Arc<TorrentTracker> {
        let mut config = Configuration::init();
        config.log_level = String::from("off");
        config.database.path = format!("sqlite://{}/data.db", directory.path().display());
        config.http_server = vec![];
        Arc::new(TorrentTracker::new(Arc::new(config), true).await)
    }

    async fn execute(tracker: &Arc<TorrentTracker>, query: &str) {
        let pool = &tracker.sqlx.sqlite.as_ref().unwrap().pool;
        sqlx::query(query).execute(pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_users_from_database() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `users_main` (`id`, `passkey`, `uploaded`, `downloaded`, `enabled`, `slots`, `slots_used`, `torrents_limit`) VALUES (1, 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa', 1000, 500, 1, -1, 0, 0)").await;
        execute(&tracker, "INSERT INTO `users_main` (`id`, `passkey`, `uploaded`, `downloaded`, `enabled`, `slots`, `slots_used`, `torrents_limit`) VALUES (2, 'bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb', 0, 0, 0, 4, 0, 10)").await;

        let loaded = tracker.sqlx.load_users(tracker.clone()).await.unwrap();
        assert_eq!(loaded, 2, "Both users should be loaded");

        let user = tracker.get_user(&"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap()).unwrap();
        assert_eq!(user.user_id, 1);
        assert!(user.enabled);
        assert_eq!(user.uploaded.load(Ordering::Relaxed), 1000);
        assert_eq!(user.downloaded.load(Ordering::Relaxed), 500);

        let disabled = tracker.get_user(&"bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".parse().unwrap()).unwrap();
        assert!(!disabled.enabled);
        assert_eq!(disabled.slots, 4);
        assert_eq!(disabled.torrents_limit, 10);
    }

    #[tokio::test]
    async fn test_load_users_removes_absent_passkeys() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `users_main` (`id`, `passkey`, `uploaded`, `downloaded`, `enabled`, `slots`, `slots_used`, `torrents_limit`) VALUES (1, 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa', 0, 0, 1, -1, 0, 0)").await;
        tracker.sqlx.load_users(tracker.clone()).await.unwrap();
        assert!(tracker.get_user(&"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap()).is_some());

        execute(&tracker, "DELETE FROM `users_main`").await;
        tracker.sqlx.load_users(tracker.clone()).await.unwrap();
        assert!(tracker.get_user(&"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap()).is_none());
    }

    #[tokio::test]
    async fn test_load_torrents_from_database() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `torrents` (`id`, `info_hash`, `status`, `snatched`, `last_action`) VALUES (10, X'aa00000000000000000000000000000000000000', 1, 3, 1700000000)").await;

        let loaded = tracker.sqlx.load_torrents(tracker.clone()).await.unwrap();
        assert_eq!(loaded, 1);

        let info_hash = "aa00000000000000000000000000000000000000".parse().unwrap();
        let torrent_entry = tracker.get_torrent(info_hash).unwrap();
        assert_eq!(torrent_entry.torrent_id, 10);
        assert_eq!(torrent_entry.status, TorrentStatus::Active);
        assert_eq!(torrent_entry.snatched, 3);
        assert_eq!(torrent_entry.updated, 1700000000);
    }

    #[tokio::test]
    async fn test_save_user_deltas_adds_to_totals() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `users_main` (`id`, `passkey`, `uploaded`, `downloaded`, `enabled`, `slots`, `slots_used`, `torrents_limit`) VALUES (1, 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa', 1000, 500, 1, -1, 0, 0)").await;

        let saved = tracker.sqlx.save_user_deltas(&[UserDelta { user_id: 1, uploaded_delta: 50, downloaded_delta: 25 }]).await.unwrap();
        assert_eq!(saved, 1);
        tracker.sqlx.save_user_deltas(&[UserDelta { user_id: 1, uploaded_delta: 50, downloaded_delta: 25 }]).await.unwrap();

        tracker.sqlx.load_users(tracker.clone()).await.unwrap();
        let user = tracker.get_user(&"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse().unwrap()).unwrap();
        assert_eq!(user.uploaded.load(Ordering::Relaxed), 1100);
        assert_eq!(user.downloaded.load(Ordering::Relaxed), 550);
    }

    #[tokio::test]
    async fn test_save_torrent_deltas_and_snatches() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `torrents` (`id`, `info_hash`, `status`, `snatched`, `last_action`) VALUES (10, X'aa00000000000000000000000000000000000000', 1, 0, 0)").await;

        tracker.sqlx.save_torrent_deltas(&[TorrentDelta { torrent_id: 10, snatched_delta: 1, last_action: 1700000100 }]).await.unwrap();
        let snatches = tracker.sqlx.save_snatches(&[crate::tracker::structs::snatch_delta::SnatchDelta {
            user_id: 1,
            torrent_id: 10,
            completed_at: 1700000100,
        }]).await.unwrap();
        assert_eq!(snatches, 1);

        tracker.sqlx.load_torrents(tracker.clone()).await.unwrap();
        let info_hash = "aa00000000000000000000000000000000000000".parse().unwrap();
        let torrent_entry = tracker.get_torrent(info_hash).unwrap();
        assert_eq!(torrent_entry.snatched, 1);
        assert_eq!(torrent_entry.updated, 1700000100);
    }

    #[tokio::test]
    async fn test_load_whitelist() {
        let directory = tempfile::tempdir().unwrap();
        let tracker = create_test_tracker(&directory).await;
        execute(&tracker, "INSERT INTO `client_whitelist` (`peer_id`) VALUES ('-qB')").await;
        let loaded = tracker.sqlx.load_whitelist(tracker.clone()).await.unwrap();
        assert_eq!(loaded, 1);
        assert!(tracker.check_whitelisted_client(&crate::tracker::structs::peer_id::PeerId(*b"-qB45000000000000001")));
    }
}
