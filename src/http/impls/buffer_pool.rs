use parking_lot::Mutex;
use crate::http::structs::buffer_pool::BufferPool;

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(500, 500)
    }
}

impl BufferPool {
    pub fn new(max_buffers: usize, max_buffer_size: usize) -> BufferPool {
        BufferPool {
            buffers: Mutex::new(Vec::with_capacity(max_buffers)),
            max_buffers,
            max_buffer_size,
        }
    }

    /// Returns an empty buffer, reusing a pooled one when available.
    pub fn take(&self) -> Vec<u8> {
        let mut lock = self.buffers.lock();
        match lock.pop() {
            Some(mut buffer) => {
                buffer.clear();
                buffer
            }
            None => Vec::with_capacity(self.max_buffer_size),
        }
    }

    /// Hands a buffer back. Buffers that grew past the soft size cap, or that
    /// arrive while the pool is full, are dropped instead of cached.
    pub fn give(&self, buffer: Vec<u8>) {
        if buffer.capacity() > self.max_buffer_size {
            return;
        }
        let mut lock = self.buffers.lock();
        if lock.len() < self.max_buffers {
            lock.push(buffer);
        }
    }
}
