use std::sync::atomic::{AtomicBool, AtomicI64};

/// Process-wide counters, updated lock-free from request handlers and the
/// background workers.
#[derive(Debug)]
pub struct StatsAtomics {
    pub started: AtomicI64,
    pub torrents: AtomicI64,
    pub users: AtomicI64,
    pub seeds: AtomicI64,
    pub peers: AtomicI64,
    pub completed: AtomicI64,
    pub whitelist_enabled: AtomicBool,
    pub whitelist: AtomicI64,
    pub users_updates: AtomicI64,
    pub torrents_updates: AtomicI64,
    pub snatches_updates: AtomicI64,
    pub transfer_ips_updates: AtomicI64,
    pub requests: AtomicI64,
    pub throughput: AtomicI64,
    pub announces_handled: AtomicI64,
    pub scrapes_handled: AtomicI64,
    pub failures: AtomicI64,
}
