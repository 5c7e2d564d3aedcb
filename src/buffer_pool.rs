//! Process-wide scratch buffer pool for page decompression, per the
//! concurrency/resource model: one reader per column chunk, no internal
//! I/O suspension, but decompression scratch space is worth sharing across
//! readers rather than allocating fresh on every page.

use std::sync::{Mutex, OnceLock};

static POOL: OnceLock<Mutex<Vec<Vec<u8>>>> = OnceLock::new();

fn pool() -> &'static Mutex<Vec<Vec<u8>>> {
    POOL.get_or_init(|| Mutex::new(Vec::new()))
}

/// A rented scratch buffer, returned to the pool on drop regardless of how
/// the caller's scope exits (including error paths).
pub struct PooledBuffer {
    buffer: Option<Vec<u8>>,
}

impl PooledBuffer {
    pub fn get_mut(&mut self) -> &mut Vec<u8> {
        self.buffer.as_mut().unwrap()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(mut buffer) = self.buffer.take() {
            buffer.clear();
            if let Ok(mut guard) = pool().lock() {
                guard.push(buffer);
            }
        }
    }
}

/// Rents a buffer from the pool, allocating a new one if none is free.
pub fn rent() -> PooledBuffer {
    let buffer = pool().lock().ok().and_then(|mut guard| guard.pop()).unwrap_or_default();
    PooledBuffer { buffer: Some(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rented_buffer_is_reused_after_drop() {
        {
            let mut buf = rent();
            buf.get_mut().extend_from_slice(&[1, 2, 3]);
        }
        let buf = rent();
        assert_eq!(buf.buffer.as_ref().unwrap().len(), 0);
    }
}
