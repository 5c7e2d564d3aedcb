//! Plain, in-memory file/row-group/column-chunk metadata structs.
//!
//! The teacher's `metadata/` module wraps Thrift-generated structs
//! (`ColumnChunk`, `ColumnMetaData`, ...); Thrift footer parsing is out of
//! scope here (`spec.md` §1), so these are the same shaped, plain data
//! holders without a Thrift dependency underneath them.

use crate::parquet_bridge::{Compression, Encoding};
use crate::schema::Schema;

/// Per-column-chunk metadata: enough to seek to and decode a chunk's pages.
#[derive(Debug, Clone)]
pub struct ColumnChunkMetadata {
    pub file_offset: u64,
    pub num_values: i64,
    pub compression: Compression,
    pub total_compressed_size: i64,
    pub total_uncompressed_size: i64,
    pub data_page_offset: i64,
    pub dictionary_page_offset: Option<i64>,
    pub encodings: Vec<Encoding>,
}

impl ColumnChunkMetadata {
    /// The byte range in the file this chunk occupies, starting at the
    /// dictionary page if present, else the first data page.
    pub fn byte_range(&self) -> (u64, u64) {
        let start = self
            .dictionary_page_offset
            .unwrap_or(self.data_page_offset);
        (start as u64, self.total_compressed_size as u64)
    }
}

/// Metadata for one row group: its row count and one chunk per leaf column,
/// in schema leaf order.
#[derive(Debug, Clone)]
pub struct RowGroupMetadata {
    pub num_rows: i64,
    pub columns: Vec<ColumnChunkMetadata>,
}

/// Top-level file metadata: the schema plus one entry per row group.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub version: i32,
    pub num_rows: i64,
    pub created_by: Option<String>,
    pub schema: Schema,
    pub row_groups: Vec<RowGroupMetadata>,
}

impl FileMetadata {
    pub fn num_row_groups(&self) -> usize {
        self.row_groups.len()
    }

    pub fn row_group(&self, i: usize) -> &RowGroupMetadata {
        &self.row_groups[i]
    }
}
