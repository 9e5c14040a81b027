use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use crate::record::structs::snatch_record::SnatchRecord;
use crate::tracker::structs::snatch_delta::SnatchDelta;
use crate::tracker::structs::torrent_delta::TorrentDelta;
use crate::tracker::structs::transfer_ip_delta::TransferIpDelta;
use crate::tracker::structs::user_delta::UserDelta;

/// Unbounded hand-off channels between the request handlers and the sync
/// workers. Senders are used from inside the swarm locks and never block;
/// each receiver is drained by exactly one worker task.
#[derive(Debug)]
pub struct SyncChannels {
    pub users_tx: UnboundedSender<UserDelta>,
    pub users_rx: Arc<Mutex<UnboundedReceiver<UserDelta>>>,
    pub torrents_tx: UnboundedSender<TorrentDelta>,
    pub torrents_rx: Arc<Mutex<UnboundedReceiver<TorrentDelta>>>,
    pub snatches_tx: UnboundedSender<SnatchDelta>,
    pub snatches_rx: Arc<Mutex<UnboundedReceiver<SnatchDelta>>>,
    pub transfer_ips_tx: UnboundedSender<TransferIpDelta>,
    pub transfer_ips_rx: Arc<Mutex<UnboundedReceiver<TransferIpDelta>>>,
    pub records_tx: UnboundedSender<SnatchRecord>,
    pub records_rx: Arc<Mutex<UnboundedReceiver<SnatchRecord>>>,
}
