use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use clap::Parser;
use log::info;
use gazelle_actix::common::common::setup_logging;
use gazelle_actix::config::structs::configuration::Configuration;
use gazelle_actix::http::http::http_service;
use gazelle_actix::http::structs::buffer_pool::BufferPool;
use gazelle_actix::http::structs::http_service_data::HttpServiceData;
use gazelle_actix::record::structs::record_sink::RecordSink;
use gazelle_actix::stats::enums::stats_event::StatsEvent;
use gazelle_actix::tracker::structs::torrent_tracker::TorrentTracker;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Create config.toml file if not exists or is broken.
    #[arg(long)]
    create_config: bool,

    /// Create the database tables on boot.
    #[arg(long)]
    create_database: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101)
    };

    setup_logging(&config);

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut _sentry_guard = None;
    if config.sentry_config.enabled {
        _sentry_guard = Some(sentry::init((config.sentry_config.dsn.clone(), sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        })));
    }

    let tracker = Arc::new(TorrentTracker::new(config.clone(), args.create_database).await);

    info!("[BOOT] Loading the canonical user and torrent sets");
    tracker.load_users(tracker.clone()).await;
    if config.tracker_config.whitelist_enabled {
        tracker.load_whitelist(tracker.clone()).await;
    }
    tracker.load_torrents(tracker.clone()).await;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let mut worker_handles = Vec::new();

    worker_handles.push(tokio::spawn(TorrentTracker::sync_users_worker(tracker.clone(), shutdown_rx.clone())));
    worker_handles.push(tokio::spawn(TorrentTracker::sync_torrents_worker(tracker.clone(), shutdown_rx.clone())));
    worker_handles.push(tokio::spawn(TorrentTracker::sync_snatches_worker(tracker.clone(), shutdown_rx.clone())));
    if config.tracker_config.transfer_ips_enabled {
        worker_handles.push(tokio::spawn(TorrentTracker::sync_transfer_ips_worker(tracker.clone(), shutdown_rx.clone())));
    }
    if config.tracker_config.record_enabled {
        worker_handles.push(tokio::spawn(RecordSink::worker(tracker.clone(), shutdown_rx.clone())));
    }

    let tracker_clone = tracker.clone();
    let mut shutdown = shutdown_rx.clone();
    worker_handles.push(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_clone.config.tracker_config.peers_cleanup_interval));
        interval.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.changed() => { return; }
                _ = interval.tick() => {
                    info!("[PEERS] Checking now for dead peers.");
                    tracker_clone.clean_peers(Duration::from_secs(tracker_clone.config.tracker_config.peers_timeout));
                }
            }
        }
    }));

    let tracker_clone = tracker.clone();
    let mut shutdown = shutdown_rx.clone();
    worker_handles.push(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_clone.config.tracker_config.reload_interval));
        interval.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.changed() => { return; }
                _ = interval.tick() => {
                    info!("[RELOAD] Refreshing the canonical user and torrent sets");
                    tracker_clone.load_users(tracker_clone.clone()).await;
                    if tracker_clone.config.tracker_config.whitelist_enabled {
                        tracker_clone.load_whitelist(tracker_clone.clone()).await;
                    }
                    tracker_clone.load_torrents(tracker_clone.clone()).await;
                }
            }
        }
    }));

    let tracker_clone = tracker.clone();
    let mut shutdown = shutdown_rx.clone();
    worker_handles.push(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_clone.config.tracker_config.slots_update_interval));
        interval.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.changed() => { return; }
                _ = interval.tick() => {
                    tracker_clone.verify_slots().await;
                }
            }
        }
    }));

    let tracker_clone = tracker.clone();
    let mut shutdown = shutdown_rx.clone();
    let console_interval = config.log_console_interval;
    worker_handles.push(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(console_interval));
        interval.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.changed() => { return; }
                _ = interval.tick() => {
                    let requests = tracker_clone.stats.requests.swap(0, Ordering::Relaxed);
                    let throughput = (requests as f64 / console_interval as f64 * 60.0 + 0.5) as i64;
                    tracker_clone.set_stats(StatsEvent::Throughput, throughput);
                    let stats = tracker_clone.get_stats();
                    info!("[STATS] Torrents: {} - Users: {} - Seeds: {} - Peers: {} - Completed: {}", stats.torrents, stats.users, stats.seeds, stats.peers, stats.completed);
                    info!("[STATS] Announces: {} - Scrapes: {} - Failures: {} - Throughput: {} rpm", stats.announces_handled, stats.scrapes_handled, stats.failures, throughput);
                }
            }
        }
    }));

    let mut server_handles = Vec::new();
    for http_server_config in &config.http_server {
        if http_server_config.enabled {
            let address: SocketAddr = http_server_config.bind_address.parse().unwrap();
            let data = Arc::new(HttpServiceData {
                torrent_tracker: tracker.clone(),
                buffer_pool: Arc::new(BufferPool::default()),
                real_ip: http_server_config.real_ip.clone(),
            });
            let (handle, server) = http_service(
                address,
                data,
                http_server_config.keep_alive,
                http_server_config.request_timeout,
                http_server_config.disconnect_timeout,
                http_server_config.threads,
            ).await;
            server_handles.push(handle);
            tokio::spawn(server);
        }
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown request received, shutting down...");
            tracker.terminate.store(true, Ordering::Relaxed);
            for handle in server_handles.iter() {
                handle.stop(true).await;
            }
            let _ = shutdown_tx.send(true);
            for handle in worker_handles {
                let _ = handle.await;
            }
            info!("Server shutting down completed");
            Ok(())
        }
    }
}
