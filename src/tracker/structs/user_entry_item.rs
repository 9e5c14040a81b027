use std::sync::atomic::{AtomicI64, AtomicU64};
use crate::tracker::structs::passkey::PassKey;

/// One user account, shared behind an `Arc` between the users map and any
/// in-flight request handlers.
///
/// The canonical fields come from the database and are only replaced by a
/// reload; the atomics are hot counters mutated under the users *read* lock.
#[derive(Debug)]
pub struct UserEntryItem {
    pub user_id: u64,
    pub passkey: PassKey,
    pub enabled: bool,
    /// Leech slot allowance; `-1` means unlimited.
    pub slots: i64,
    /// Maximum concurrent swarms per user; `0` means unlimited.
    pub torrents_limit: u64,
    pub uploaded: AtomicU64,
    pub downloaded: AtomicU64,
    pub slots_used: AtomicI64,
    pub swarms_used: AtomicI64,
}
