//! Reader/writer configuration. Plain structs, no environment variables or
//! config files — the core persists no state across calls (design notes).

/// Options controlling how a reader interprets ambiguous wire bytes.
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Treat `ByteArray` columns without an explicit logical annotation as
    /// UTF-8 text rather than opaque bytes.
    pub treat_byte_array_as_utf8: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            treat_byte_array_as_utf8: false,
        }
    }
}

/// Options controlling how a writer lays out new column chunks.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// Page bodies are flushed once they would exceed this many bytes.
    pub page_size_bytes: usize,
    /// Minimum number of distinct values below which a dictionary page is
    /// worth emitting instead of PLAIN-encoding every occurrence.
    pub dictionary_index_threshold: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            page_size_bytes: 1024 * 1024,
            dictionary_index_threshold: 1,
        }
    }
}
