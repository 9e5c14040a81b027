use std::sync::Arc;
use crate::http::structs::buffer_pool::BufferPool;
use crate::tracker::structs::torrent_tracker::TorrentTracker;

/// Per-listener state injected into the actix handlers.
#[derive(Debug)]
pub struct HttpServiceData {
    pub torrent_tracker: Arc<TorrentTracker>,
    pub buffer_pool: Arc<BufferPool>,
    /// Header consulted for the client address when behind a proxy.
    pub real_ip: String,
}
