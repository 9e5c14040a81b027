use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64};
use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::Mutex;
use crate::config::structs::configuration::Configuration;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::stats::structs::stats_atomics::StatsAtomics;
use crate::tracker::structs::sync_channels::SyncChannels;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub async fn new(config: Arc<Configuration>, create_database: bool) -> TorrentTracker
    {
        let tracker_config = &config.tracker_config;

        let (users_tx, users_rx) = unbounded_channel();
        let (torrents_tx, torrents_rx) = unbounded_channel();
        let (snatches_tx, snatches_rx) = unbounded_channel();
        let (transfer_ips_tx, transfer_ips_rx) = unbounded_channel();
        let (records_tx, records_rx) = unbounded_channel();

        TorrentTracker {
            config: config.clone(),
            torrents_sharding: Arc::new(Default::default()),
            users: Arc::new(RwLock::new(BTreeMap::new())),
            whitelist: Arc::new(RwLock::new(Vec::new())),
            stats: Arc::new(StatsAtomics {
                started: AtomicI64::new(Utc::now().timestamp()),
                torrents: AtomicI64::new(0),
                users: AtomicI64::new(0),
                seeds: AtomicI64::new(0),
                peers: AtomicI64::new(0),
                completed: AtomicI64::new(0),
                whitelist_enabled: AtomicBool::new(tracker_config.whitelist_enabled),
                whitelist: AtomicI64::new(0),
                users_updates: AtomicI64::new(0),
                torrents_updates: AtomicI64::new(0),
                snatches_updates: AtomicI64::new(0),
                transfer_ips_updates: AtomicI64::new(0),
                requests: AtomicI64::new(0),
                throughput: AtomicI64::new(0),
                announces_handled: AtomicI64::new(0),
                scrapes_handled: AtomicI64::new(0),
                failures: AtomicI64::new(0),
            }),
            sync: SyncChannels {
                users_tx,
                users_rx: Arc::new(Mutex::new(users_rx)),
                torrents_tx,
                torrents_rx: Arc::new(Mutex::new(torrents_rx)),
                snatches_tx,
                snatches_rx: Arc::new(Mutex::new(snatches_rx)),
                transfer_ips_tx,
                transfer_ips_rx: Arc::new(Mutex::new(transfer_ips_rx)),
                records_tx,
                records_rx: Arc::new(Mutex::new(records_rx)),
            },
            sqlx: DatabaseConnector::new(config.clone(), create_database).await,
            terminate: Arc::new(AtomicBool::new(false)),
        }
    }
}
