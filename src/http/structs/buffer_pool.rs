use parking_lot::Mutex;

/// Bounded cache of reusable byte buffers for response encoding.
///
/// Announce and scrape bodies are small and hot; reusing buffers avoids a
/// per-request allocation. `take` never blocks beyond the mutex: an empty
/// pool just allocates.
#[derive(Debug)]
pub struct BufferPool {
    pub buffers: Mutex<Vec<Vec<u8>>>,
    pub max_buffers: usize,
    pub max_buffer_size: usize,
}
