use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use log::info;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::passkey::PassKey;
use crate::tracker::structs::peer_id::PeerId;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::tracker::structs::user_entry_item::UserEntryItem;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub fn get_user(&self, passkey: &PassKey) -> Option<Arc<UserEntryItem>>
    {
        let lock = self.users.read_recursive();
        lock.get(passkey).cloned()
    }

    #[tracing::instrument(level = "debug")]
    pub fn get_users_amount(&self) -> u64
    {
        let lock = self.users.read_recursive();
        lock.len() as u64
    }

    /// Replaces the user set with a freshly loaded snapshot.
    ///
    /// Passkeys absent from the snapshot are dropped; surviving users get
    /// their canonical fields overwritten while `slots_used`/`swarms_used`
    /// carry over (the slot sweep repairs any drift against the swarms).
    #[tracing::instrument(level = "debug", skip(snapshot))]
    pub fn reload_users(&self, snapshot: BTreeMap<PassKey, UserEntryItem>) -> u64
    {
        let mut lock = self.users.write();
        let mut replaced: BTreeMap<PassKey, Arc<UserEntryItem>> = BTreeMap::new();
        for (passkey, user_entry_item) in snapshot {
            if let Some(previous) = lock.get(&passkey) {
                user_entry_item.slots_used.store(previous.slots_used.load(Ordering::Relaxed), Ordering::Relaxed);
                user_entry_item.swarms_used.store(previous.swarms_used.load(Ordering::Relaxed), Ordering::Relaxed);
            }
            replaced.insert(passkey, Arc::new(user_entry_item));
        }
        let users_count = replaced.len() as u64;
        *lock = replaced;
        drop(lock);
        self.set_stats(StatsEvent::Users, users_count as i64);
        users_count
    }

    #[tracing::instrument(level = "debug", skip(prefixes))]
    pub fn reload_whitelist(&self, prefixes: Vec<String>) -> u64
    {
        let mut lock = self.whitelist.write();
        *lock = prefixes;
        let whitelist_count = lock.len() as u64;
        drop(lock);
        self.set_stats(StatsEvent::Whitelist, whitelist_count as i64);
        whitelist_count
    }

    /// Checks the announcing client against the peer-id prefix whitelist.
    #[tracing::instrument(level = "debug")]
    pub fn check_whitelisted_client(&self, peer_id: &PeerId) -> bool
    {
        let lock = self.whitelist.read_recursive();
        lock.iter().any(|prefix| peer_id.0.starts_with(prefix.as_bytes()))
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_users(&self, tracker: Arc<TorrentTracker>)
    {
        if let Ok(users) = self.sqlx.load_users(tracker).await {
            info!("[RELOAD] Loaded {users} users");
        }
    }

    #[tracing::instrument(level = "debug")]
    pub async fn load_whitelist(&self, tracker: Arc<TorrentTracker>)
    {
        if let Ok(clients) = self.sqlx.load_whitelist(tracker).await {
            info!("[RELOAD] Loaded {clients} whitelisted clients");
        }
    }
}
