//! Statistics event types for tracking various metrics.

use serde::{Deserialize, Serialize};

/// Enumeration of all trackable statistics events.
///
/// Each variant represents a specific metric that can be incremented or set.
/// Used with `TorrentTracker::update_stats()` to update counters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub enum StatsEvent {
    Torrents,
    Users,
    Seeds,
    Peers,
    Completed,
    Whitelist,
    UsersUpdates,
    TorrentsUpdates,
    SnatchesUpdates,
    TransferIpsUpdates,
    Requests,
    Throughput,
    AnnouncesHandled,
    ScrapesHandled,
    Failures,
}
