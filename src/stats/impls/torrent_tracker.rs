use std::sync::atomic::Ordering;
use crate::stats::enums::stats_event::StatsEvent;
use crate::stats::structs::stats::Stats;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub fn get_stats(&self) -> Stats
    {
        Stats {
            started: self.stats.started.load(Ordering::Relaxed),
            torrents: self.stats.torrents.load(Ordering::Relaxed),
            users: self.stats.users.load(Ordering::Relaxed),
            seeds: self.stats.seeds.load(Ordering::Relaxed),
            peers: self.stats.peers.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            whitelist_enabled: self.stats.whitelist_enabled.load(Ordering::Relaxed),
            whitelist: self.stats.whitelist.load(Ordering::Relaxed),
            users_updates: self.stats.users_updates.load(Ordering::Relaxed),
            torrents_updates: self.stats.torrents_updates.load(Ordering::Relaxed),
            snatches_updates: self.stats.snatches_updates.load(Ordering::Relaxed),
            transfer_ips_updates: self.stats.transfer_ips_updates.load(Ordering::Relaxed),
            requests: self.stats.requests.load(Ordering::Relaxed),
            throughput: self.stats.throughput.load(Ordering::Relaxed),
            announces_handled: self.stats.announces_handled.load(Ordering::Relaxed),
            scrapes_handled: self.stats.scrapes_handled.load(Ordering::Relaxed),
            failures: self.stats.failures.load(Ordering::Relaxed),
        }
    }

    #[tracing::instrument(level = "debug")]
    pub fn update_stats(&self, event: StatsEvent, value: i64) -> i64
    {
        let atomic = match event {
            StatsEvent::Torrents => &self.stats.torrents,
            StatsEvent::Users => &self.stats.users,
            StatsEvent::Seeds => &self.stats.seeds,
            StatsEvent::Peers => &self.stats.peers,
            StatsEvent::Completed => &self.stats.completed,
            StatsEvent::Whitelist => &self.stats.whitelist,
            StatsEvent::UsersUpdates => &self.stats.users_updates,
            StatsEvent::TorrentsUpdates => &self.stats.torrents_updates,
            StatsEvent::SnatchesUpdates => &self.stats.snatches_updates,
            StatsEvent::TransferIpsUpdates => &self.stats.transfer_ips_updates,
            StatsEvent::Requests => &self.stats.requests,
            StatsEvent::Throughput => &self.stats.throughput,
            StatsEvent::AnnouncesHandled => &self.stats.announces_handled,
            StatsEvent::ScrapesHandled => &self.stats.scrapes_handled,
            StatsEvent::Failures => &self.stats.failures,
        };
        atomic.fetch_add(value, Ordering::Relaxed) + value
    }

    #[tracing::instrument(level = "debug")]
    pub fn set_stats(&self, event: StatsEvent, value: i64) -> i64
    {
        let atomic = match event {
            StatsEvent::Torrents => &self.stats.torrents,
            StatsEvent::Users => &self.stats.users,
            StatsEvent::Seeds => &self.stats.seeds,
            StatsEvent::Peers => &self.stats.peers,
            StatsEvent::Completed => &self.stats.completed,
            StatsEvent::Whitelist => &self.stats.whitelist,
            StatsEvent::UsersUpdates => &self.stats.users_updates,
            StatsEvent::TorrentsUpdates => &self.stats.torrents_updates,
            StatsEvent::SnatchesUpdates => &self.stats.snatches_updates,
            StatsEvent::TransferIpsUpdates => &self.stats.transfer_ips_updates,
            StatsEvent::Requests => &self.stats.requests,
            StatsEvent::Throughput => &self.stats.throughput,
            StatsEvent::AnnouncesHandled => &self.stats.announces_handled,
            StatsEvent::ScrapesHandled => &self.stats.scrapes_handled,
            StatsEvent::Failures => &self.stats.failures,
        };
        atomic.store(value, Ordering::Relaxed);
        value
    }
}
