//! # Gazelle-Actix Private BitTorrent Tracker
//!
//! A private BitTorrent tracker built with Rust and the Actix-web framework.
//!
//! ## Overview
//!
//! Gazelle-Actix serves `announce` and `scrape` requests for peers identified
//! by a per-user passkey embedded in the request path. It keeps the live swarm
//! census (which peers currently seed or leech which torrent) in memory and
//! periodically reconciles it with a relational database of record: per-user
//! upload/download deltas, snatch history and torrent statistics are flushed
//! in batches, while the canonical user and torrent sets are reloaded on a
//! timer.
//!
//! ## Features
//!
//! - **Passkey authentication**: every request carries a 32-character passkey
//!   mapping to a user account
//! - **Swarm accounting**: per-session upload/download deltas, snatch
//!   counting, leech slot enforcement
//! - **Database reconciliation**: MySQL for production, SQLite3 for
//!   development, with operator-configurable table and column names
//! - **Client whitelist**: optional peer-id prefix filtering
//! - **Event records**: optional append-only snatch log rotated daily
//!
//! ## BEP Compliance
//!
//! - BEP 3: The BitTorrent Protocol Specification
//! - BEP 23: Tracker Returns Compact Peer Lists
//! - BEP 48: Tracker Protocol Extension: Scrape

/// Shared utilities and error handling.
///
/// Contains the query parser, hex conversion helpers, logging setup and the
/// `CustomError` type used across all modules.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing and validating configuration from TOML files.
/// Supports customizable database schemas and multi-server configurations.
pub mod config;

/// Database backend module.
///
/// Provides a unified interface for SQLite3 and MySQL backends with support
/// for custom table and column names, paged snapshot loads and batched delta
/// flushes.
pub mod database;

/// HTTP tracker protocol implementation.
///
/// Handles announce and scrape requests over HTTP according to the BitTorrent
/// tracker protocol specification, plus the plain-text `/stats` endpoint.
pub mod http;

/// Append-only event record sink.
///
/// Writes snatch events to daily-rotated files when enabled.
pub mod record;

/// Statistics tracking module.
///
/// Collects real-time metrics on tracker activity including peer counts,
/// announce/scrape requests and request throughput.
pub mod stats;

/// Core tracker logic module.
///
/// Contains the swarm state, user accounts, sharded torrent storage, the
/// announce/scrape engines and the delta synchronisation workers.
pub mod tracker;
