use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use log::{error, info, warn};
use tokio::sync::watch;
use tokio::time::sleep;
use crate::stats::enums::stats_event::StatsEvent;
use crate::tracker::structs::snatch_delta::SnatchDelta;
use crate::tracker::structs::torrent_delta::TorrentDelta;
use crate::tracker::structs::torrent_tracker::TorrentTracker;
use crate::tracker::structs::transfer_ip_delta::TransferIpDelta;
use crate::tracker::structs::user_delta::UserDelta;
use crate::tracker::structs::user_entry_item::UserEntryItem;

impl TorrentTracker {
    #[tracing::instrument(level = "debug")]
    pub fn queue_user_delta(&self, user_delta: UserDelta)
    {
        if self.sync.users_tx.send(user_delta).is_ok() {
            self.update_stats(StatsEvent::UsersUpdates, 1);
        }
    }

    #[tracing::instrument(level = "debug")]
    pub fn queue_torrent_delta(&self, torrent_delta: TorrentDelta)
    {
        if self.sync.torrents_tx.send(torrent_delta).is_ok() {
            self.update_stats(StatsEvent::TorrentsUpdates, 1);
        }
    }

    #[tracing::instrument(level = "debug")]
    pub fn queue_snatch_delta(&self, snatch_delta: SnatchDelta)
    {
        if self.sync.snatches_tx.send(snatch_delta).is_ok() {
            self.update_stats(StatsEvent::SnatchesUpdates, 1);
        }
    }

    #[tracing::instrument(level = "debug")]
    pub fn queue_transfer_ip_delta(&self, transfer_ip_delta: TransferIpDelta)
    {
        if self.sync.transfer_ips_tx.send(transfer_ip_delta).is_ok() {
            self.update_stats(StatsEvent::TransferIpsUpdates, 1);
        }
    }

    /// Drains the user delta channel, coalescing deltas per user and flushing
    /// as `col = col + delta` batches. Exits after a final drain once the
    /// shutdown signal fires.
    pub async fn sync_users_worker(tracker: Arc<TorrentTracker>, mut shutdown: watch::Receiver<bool>)
    {
        let tracker_config = tracker.config.tracker_config.clone();
        let receiver = tracker.sync.users_rx.clone();
        let mut receiver = receiver.lock().await;
        let mut buffer: HashMap<u64, UserDelta> = HashMap::new();
        let mut received = 0i64;
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_config.sync_flush_interval));
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    while let Ok(user_delta) = receiver.try_recv() {
                        coalesce_user_delta(&mut buffer, user_delta);
                        received += 1;
                    }
                    if !buffer.is_empty() {
                        tracker.flush_user_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                    }
                    tracker.update_stats(StatsEvent::UsersUpdates, -received);
                    info!("[SYNC USERS] Worker stopped");
                    return;
                }
                _ = interval.tick() => {
                    if !buffer.is_empty() {
                        tracker.flush_user_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                        tracker.update_stats(StatsEvent::UsersUpdates, -received);
                        received = 0;
                    }
                }
                user_delta = receiver.recv() => {
                    if let Some(user_delta) = user_delta {
                        coalesce_user_delta(&mut buffer, user_delta);
                        received += 1;
                        if buffer.len() as u64 >= tracker_config.sync_batch_size {
                            tracker.flush_user_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                            tracker.update_stats(StatsEvent::UsersUpdates, -received);
                            received = 0;
                        }
                    }
                }
            }
        }
    }

    /// Drains the torrent delta channel, keeping one entry per torrent with
    /// summed snatch increments and the newest last-action timestamp.
    pub async fn sync_torrents_worker(tracker: Arc<TorrentTracker>, mut shutdown: watch::Receiver<bool>)
    {
        let tracker_config = tracker.config.tracker_config.clone();
        let receiver = tracker.sync.torrents_rx.clone();
        let mut receiver = receiver.lock().await;
        let mut buffer: HashMap<u64, TorrentDelta> = HashMap::new();
        let mut received = 0i64;
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_config.sync_flush_interval));
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    while let Ok(torrent_delta) = receiver.try_recv() {
                        coalesce_torrent_delta(&mut buffer, torrent_delta);
                        received += 1;
                    }
                    if !buffer.is_empty() {
                        tracker.flush_torrent_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                    }
                    tracker.update_stats(StatsEvent::TorrentsUpdates, -received);
                    info!("[SYNC TORRENTS] Worker stopped");
                    return;
                }
                _ = interval.tick() => {
                    if !buffer.is_empty() {
                        tracker.flush_torrent_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                        tracker.update_stats(StatsEvent::TorrentsUpdates, -received);
                        received = 0;
                    }
                }
                torrent_delta = receiver.recv() => {
                    if let Some(torrent_delta) = torrent_delta {
                        coalesce_torrent_delta(&mut buffer, torrent_delta);
                        received += 1;
                        if buffer.len() as u64 >= tracker_config.sync_batch_size {
                            tracker.flush_torrent_deltas(std::mem::take(&mut buffer).into_values().collect()).await;
                            tracker.update_stats(StatsEvent::TorrentsUpdates, -received);
                            received = 0;
                        }
                    }
                }
            }
        }
    }

    /// Drains the snatch channel into append-only transfer history rows.
    pub async fn sync_snatches_worker(tracker: Arc<TorrentTracker>, mut shutdown: watch::Receiver<bool>)
    {
        let tracker_config = tracker.config.tracker_config.clone();
        let receiver = tracker.sync.snatches_rx.clone();
        let mut receiver = receiver.lock().await;
        let mut buffer: Vec<SnatchDelta> = Vec::new();
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_config.sync_flush_interval));
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    while let Ok(snatch_delta) = receiver.try_recv() {
                        buffer.push(snatch_delta);
                    }
                    if !buffer.is_empty() {
                        let flushed = buffer.len() as i64;
                        tracker.flush_snatch_deltas(std::mem::take(&mut buffer)).await;
                        tracker.update_stats(StatsEvent::SnatchesUpdates, -flushed);
                    }
                    info!("[SYNC SNATCHES] Worker stopped");
                    return;
                }
                _ = interval.tick() => {
                    if !buffer.is_empty() {
                        let flushed = buffer.len() as i64;
                        tracker.flush_snatch_deltas(std::mem::take(&mut buffer)).await;
                        tracker.update_stats(StatsEvent::SnatchesUpdates, -flushed);
                    }
                }
                snatch_delta = receiver.recv() => {
                    if let Some(snatch_delta) = snatch_delta {
                        buffer.push(snatch_delta);
                        if buffer.len() as u64 >= tracker_config.sync_batch_size {
                            let flushed = buffer.len() as i64;
                            tracker.flush_snatch_deltas(std::mem::take(&mut buffer)).await;
                            tracker.update_stats(StatsEvent::SnatchesUpdates, -flushed);
                        }
                    }
                }
            }
        }
    }

    /// Drains the extended accounting channel into transfer IP rows.
    pub async fn sync_transfer_ips_worker(tracker: Arc<TorrentTracker>, mut shutdown: watch::Receiver<bool>)
    {
        let tracker_config = tracker.config.tracker_config.clone();
        let receiver = tracker.sync.transfer_ips_rx.clone();
        let mut receiver = receiver.lock().await;
        let mut buffer: Vec<TransferIpDelta> = Vec::new();
        let mut interval = tokio::time::interval(Duration::from_secs(tracker_config.sync_flush_interval));
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    while let Ok(transfer_ip_delta) = receiver.try_recv() {
                        buffer.push(transfer_ip_delta);
                    }
                    if !buffer.is_empty() {
                        let flushed = buffer.len() as i64;
                        tracker.flush_transfer_ip_deltas(std::mem::take(&mut buffer)).await;
                        tracker.update_stats(StatsEvent::TransferIpsUpdates, -flushed);
                    }
                    info!("[SYNC TRANSFER IPS] Worker stopped");
                    return;
                }
                _ = interval.tick() => {
                    if !buffer.is_empty() {
                        let flushed = buffer.len() as i64;
                        tracker.flush_transfer_ip_deltas(std::mem::take(&mut buffer)).await;
                        tracker.update_stats(StatsEvent::TransferIpsUpdates, -flushed);
                    }
                }
                transfer_ip_delta = receiver.recv() => {
                    if let Some(transfer_ip_delta) = transfer_ip_delta {
                        buffer.push(transfer_ip_delta);
                        if buffer.len() as u64 >= tracker_config.sync_batch_size {
                            let flushed = buffer.len() as i64;
                            tracker.flush_transfer_ip_deltas(std::mem::take(&mut buffer)).await;
                            tracker.update_stats(StatsEvent::TransferIpsUpdates, -flushed);
                        }
                    }
                }
            }
        }
    }

    /// Recomputes per-user leech and swarm counts from the live swarms,
    /// repairing any drift in the hot counters, and writes the slot usage
    /// back when slot enforcement is on.
    #[tracing::instrument(level = "debug")]
    pub async fn verify_slots(&self)
    {
        let mut counts: HashMap<u64, (i64, i64)> = HashMap::new();
        self.torrents_sharding.iter_all_torrents(|_, torrent_entry| {
            for peer_key in torrent_entry.peers.keys() {
                let entry = counts.entry(peer_key.user_id).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += 1;
            }
            for peer_key in torrent_entry.seeds.keys() {
                let entry = counts.entry(peer_key.user_id).or_insert((0, 0));
                entry.1 += 1;
            }
        });

        let users: Vec<Arc<UserEntryItem>> = {
            let lock = self.users.read_recursive();
            lock.values().cloned().collect()
        };

        let mut slot_rows: Vec<(u64, i64)> = Vec::with_capacity(users.len());
        for user in users {
            let (leeching, swarms) = counts.get(&user.user_id).copied().unwrap_or((0, 0));
            user.slots_used.store(leeching, Ordering::Relaxed);
            user.swarms_used.store(swarms, Ordering::Relaxed);
            slot_rows.push((user.user_id, leeching));
        }

        if self.config.tracker_config.slots_enabled && !slot_rows.is_empty() {
            match self.sqlx.save_slots(&slot_rows).await {
                Ok(rows) => { info!("[SLOTS] Verified slot usage for {rows} users"); }
                Err(error) => { warn!("[SLOTS] Unable to write slot usage: {error}"); }
            }
        }
    }

    pub async fn flush_user_deltas(&self, batch: Vec<UserDelta>)
    {
        let batch_len = batch.len();
        let mut attempt = 0u64;
        loop {
            match self.sqlx.save_user_deltas(&batch).await {
                Ok(rows) => {
                    info!("[SYNC USERS] Synced {rows} user deltas");
                    return;
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.config.tracker_config.sync_max_retries {
                        error!("[SYNC USERS] Dropping {batch_len} user deltas after {attempt} attempts: {error}");
                        return;
                    }
                    warn!("[SYNC USERS] Unable to sync {batch_len} user deltas (attempt {attempt}): {error}");
                    sleep(self.sync_backoff(attempt)).await;
                }
            }
        }
    }

    pub async fn flush_torrent_deltas(&self, batch: Vec<TorrentDelta>)
    {
        let batch_len = batch.len();
        let mut attempt = 0u64;
        loop {
            match self.sqlx.save_torrent_deltas(&batch).await {
                Ok(rows) => {
                    info!("[SYNC TORRENTS] Synced {rows} torrent deltas");
                    return;
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.config.tracker_config.sync_max_retries {
                        error!("[SYNC TORRENTS] Dropping {batch_len} torrent deltas after {attempt} attempts: {error}");
                        return;
                    }
                    warn!("[SYNC TORRENTS] Unable to sync {batch_len} torrent deltas (attempt {attempt}): {error}");
                    sleep(self.sync_backoff(attempt)).await;
                }
            }
        }
    }

    pub async fn flush_snatch_deltas(&self, batch: Vec<SnatchDelta>)
    {
        let batch_len = batch.len();
        let mut attempt = 0u64;
        loop {
            match self.sqlx.save_snatches(&batch).await {
                Ok(rows) => {
                    info!("[SYNC SNATCHES] Synced {rows} snatches");
                    return;
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.config.tracker_config.sync_max_retries {
                        error!("[SYNC SNATCHES] Dropping {batch_len} snatches after {attempt} attempts: {error}");
                        return;
                    }
                    warn!("[SYNC SNATCHES] Unable to sync {batch_len} snatches (attempt {attempt}): {error}");
                    sleep(self.sync_backoff(attempt)).await;
                }
            }
        }
    }

    pub async fn flush_transfer_ip_deltas(&self, batch: Vec<TransferIpDelta>)
    {
        let batch_len = batch.len();
        let mut attempt = 0u64;
        loop {
            match self.sqlx.save_transfer_ips(&batch).await {
                Ok(rows) => {
                    info!("[SYNC TRANSFER IPS] Synced {rows} transfer IP rows");
                    return;
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.config.tracker_config.sync_max_retries {
                        error!("[SYNC TRANSFER IPS] Dropping {batch_len} transfer IP rows after {attempt} attempts: {error}");
                        return;
                    }
                    warn!("[SYNC TRANSFER IPS] Unable to sync {batch_len} transfer IP rows (attempt {attempt}): {error}");
                    sleep(self.sync_backoff(attempt)).await;
                }
            }
        }
    }

    fn sync_backoff(&self, attempt: u64) -> Duration
    {
        Duration::from_millis(self.config.tracker_config.sync_retry_delay << (attempt.saturating_sub(1).min(6)))
    }
}

#[inline]
fn coalesce_user_delta(buffer: &mut HashMap<u64, UserDelta>, user_delta: UserDelta)
{
    let entry = buffer.entry(user_delta.user_id).or_insert(UserDelta {
        user_id: user_delta.user_id,
        uploaded_delta: 0,
        downloaded_delta: 0,
    });
    entry.uploaded_delta += user_delta.uploaded_delta;
    entry.downloaded_delta += user_delta.downloaded_delta;
}

#[inline]
fn coalesce_torrent_delta(buffer: &mut HashMap<u64, TorrentDelta>, torrent_delta: TorrentDelta)
{
    let entry = buffer.entry(torrent_delta.torrent_id).or_insert(TorrentDelta {
        torrent_id: torrent_delta.torrent_id,
        snatched_delta: 0,
        last_action: 0,
    });
    entry.snatched_delta += torrent_delta.snatched_delta;
    if torrent_delta.last_action > entry.last_action {
        entry.last_action = torrent_delta.last_action;
    }
}
