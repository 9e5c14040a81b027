//! Core private tracker implementation.
//!
//! This module contains the main tracker logic: the swarm census, user
//! accounts, announce/scrape handling and the delta synchronisation with the
//! database of record.
//!
//! # Architecture
//!
//! - Torrents are distributed across 256 shards based on the first byte of
//!   the info hash; each shard is protected by a `RwLock`. The shard write
//!   lock serialises all mutations of a torrent's swarm, so announces for the
//!   same torrent apply in arrival order.
//! - Users are keyed by their passkey behind a single `RwLock`; hot counters
//!   (session totals, slot usage) are atomics inside `Arc`-shared entries so
//!   request handlers never take the users write lock.
//! - Every state change emits typed deltas onto unbounded channels; the sync
//!   workers drain them into batched SQL, so request handlers never wait on
//!   the database.

/// Enumerations for tracker operations.
///
/// Contains enums for announce events and torrent lifecycle status.
pub mod enums;

/// Implementation blocks for tracker structs.
///
/// Contains the method implementations for all tracker-related structs
/// including the main `TorrentTracker`, sharding logic, the announce and
/// scrape engines and the sync workers.
pub mod impls;

/// Data structures for tracker operations.
///
/// Contains struct definitions for torrents, peers, users, deltas and
/// request/response types.
pub mod structs;
