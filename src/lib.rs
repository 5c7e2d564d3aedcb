#![forbid(unsafe_code)]
//! Column encoding core for a Parquet-compatible columnar file format:
//! bit-level primitives, the RLE/bit-packed hybrid codec, schema modeling,
//! column chunk reading and writing, and Dremel-style record assembly.
//!
//! Thrift footer parsing, physical file I/O beyond `Read + Seek`, and query
//! execution are explicitly out of scope; see `SPEC_FULL.md`.

#[macro_use]
pub mod error;
pub mod assembler;
mod buffer_pool;
pub mod column;
pub mod compression;
pub mod encoding;
pub mod metadata;
pub mod options;
pub mod page;
mod parquet_bridge;
pub mod reader;
pub mod schema;
pub mod types;

pub use parquet_bridge::{Compression, Encoding};
pub use reader::{DataColumn, PageSource, Reader};

/// Magic bytes opening and closing a Parquet file.
pub const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];
/// Size in bytes of the footer's trailing (length, magic) pair.
pub const FOOTER_SIZE: u64 = 8;
/// How many bytes to read speculatively from the end of a file on first
/// open, before knowing the footer's exact length.
pub const DEFAULT_FOOTER_READ_SIZE: u64 = 64 * 1024;
