//! The core's external-facing entry point: `open_reader` / `read_row_group`
//! / `read_column`, matching the in-process API the wider library sits
//! behind. Physical I/O and footer (Thrift) parsing remain the caller's
//! job — this module only orchestrates the already-decoded
//! [`FileMetadata`] plus whatever supplies page bytes, via [`PageSource`].
//!
//! Each `DataColumn` is the flat `(field, values, defLevels?, repLevels?)`
//! triple; reconstructing nested values from it is `assembler::assemble_leaf`,
//! a separate step a caller opts into.

use crate::column::reader::ColumnChunkReader;
use crate::error::{Error, Result};
use crate::metadata::FileMetadata;
use crate::options::ReaderOptions;
use crate::page::DataPage;
use crate::parquet_bridge::Compression;
use crate::schema::{ColumnDescriptor, Schema};
use crate::assembler::ScalarValue;

/// Supplies one column chunk's pages. Physical seeking, buffering, and page
/// header decoding (Thrift, in a full implementation) live on the other
/// side of this trait; the core only needs pages handed to it in order.
pub trait PageSource {
    /// Returns the chunk's dictionary page, if any: `(compressed bytes,
    /// declared uncompressed size)`. Called at most once, before the first
    /// call to `next_data_page`.
    fn dictionary_page(&mut self) -> Result<Option<(Vec<u8>, usize)>>;

    /// Returns the next data page, or `None` once the chunk is exhausted.
    /// `uncompressed_size` is the page's declared uncompressed byte count
    /// (0 when the chunk's compression is `Uncompressed`).
    fn next_data_page(&mut self) -> Result<Option<(DataPage, usize)>>;
}

/// The flat per-column result: present values plus the level streams
/// needed to reconstruct nesting, absent exactly when the leaf's
/// `maxDefLevel`/`maxRepLevel` are both zero.
#[derive(Debug, Clone)]
pub struct DataColumn {
    pub descriptor: ColumnDescriptor,
    pub values: Vec<ScalarValue>,
    pub def_levels: Option<Vec<i16>>,
    pub rep_levels: Option<Vec<i16>>,
}

/// A bound, read-only view over one file's already-decoded metadata.
pub struct Reader<'a> {
    metadata: &'a FileMetadata,
    options: ReaderOptions,
}

impl<'a> Reader<'a> {
    /// Opens a reader over metadata the caller's Thrift/footer collaborator
    /// has already decoded. There is no byte source here to seek — that
    /// happens per column chunk, through the `PageSource` passed to
    /// `read_row_group`/`read_column`.
    pub fn open_reader(metadata: &'a FileMetadata, options: ReaderOptions) -> Self {
        Self { metadata, options }
    }

    pub fn schema(&self) -> &Schema {
        &self.metadata.schema
    }

    pub fn num_row_groups(&self) -> usize {
        self.metadata.num_row_groups()
    }

    /// Reads every leaf column of one row group, in schema leaf order.
    /// `sources` must supply exactly one `PageSource` per leaf, in that
    /// same order.
    pub fn read_row_group(
        &self,
        row_group_index: usize,
        sources: &mut [Box<dyn PageSource + '_>],
    ) -> Result<Vec<DataColumn>> {
        let row_group = self.metadata.row_group(row_group_index);
        let leaves = self.metadata.schema.leaves();
        if sources.len() != leaves.len() {
            return Err(Error::LevelMismatch(format!(
                "row group has {} leaf columns but {} page sources were given",
                leaves.len(),
                sources.len()
            )));
        }

        leaves
            .iter()
            .zip(row_group.columns.iter())
            .zip(sources.iter_mut())
            .map(|((descriptor, chunk), source)| {
                read_column_chunk(descriptor, row_group.num_rows, chunk.compression, source.as_mut(), &self.options)
            })
            .collect()
    }

    /// Reads a single leaf column of one row group, addressed by its full
    /// path from the schema root (including the root's own name, matching
    /// `ColumnDescriptor::path`).
    pub fn read_column(
        &self,
        row_group_index: usize,
        leaf_path: &[String],
        source: &mut dyn PageSource,
    ) -> Result<DataColumn> {
        let row_group = self.metadata.row_group(row_group_index);
        let leaves = self.metadata.schema.leaves();
        let leaf_index = leaves
            .iter()
            .position(|d| d.path() == leaf_path)
            .ok_or_else(|| Error::SchemaAssignConflict(format!("no leaf column at path {:?}", leaf_path)))?;

        let descriptor = &leaves[leaf_index];
        let chunk = &row_group.columns[leaf_index];
        read_column_chunk(descriptor, row_group.num_rows, chunk.compression, source, &self.options)
    }
}

fn read_column_chunk(
    descriptor: &ColumnDescriptor,
    num_rows: i64,
    compression: Compression,
    source: &mut dyn PageSource,
    options: &ReaderOptions,
) -> Result<DataColumn> {
    let mut chunk_reader = ColumnChunkReader::new(descriptor, *options);

    if let Some((bytes, uncompressed_size)) = source.dictionary_page()? {
        chunk_reader.load_dictionary_page(&bytes, uncompressed_size, compression)?;
    }

    let mut values = Vec::new();
    let mut def_levels = Vec::new();
    let mut rep_levels = Vec::new();
    let mut rows_seen: i64 = 0;

    while rows_seen < num_rows.max(1) {
        let Some((page, uncompressed_size)) = source.next_data_page()? else {
            break;
        };
        if page.num_values() == 0 {
            continue;
        }
        let decoded = chunk_reader.read_page(&page, compression, uncompressed_size)?;

        let new_rows = if decoded.rep_levels.is_empty() {
            decoded.def_levels.len()
        } else {
            decoded.rep_levels.iter().filter(|&&r| r == 0).count()
        };
        rows_seen += new_rows as i64;

        values.extend(decoded.values);
        def_levels.extend(decoded.def_levels);
        rep_levels.extend(decoded.rep_levels);
    }

    Ok(DataColumn {
        descriptor: descriptor.clone(),
        values,
        def_levels: if descriptor.max_def_level() > 0 { Some(def_levels) } else { None },
        rep_levels: if descriptor.max_rep_level() > 0 { Some(rep_levels) } else { None },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::hybrid_rle::encode_with_length;
    use crate::metadata::{ColumnChunkMetadata, RowGroupMetadata};
    use crate::page::{DataPageHeader, DataPageHeaderV1};
    use crate::parquet_bridge::Encoding;
    use crate::schema::{data, Repetition, StructBuilder};

    struct VecPageSource {
        dictionary: Option<(Vec<u8>, usize)>,
        pages: Vec<(DataPage, usize)>,
    }

    impl PageSource for VecPageSource {
        fn dictionary_page(&mut self) -> Result<Option<(Vec<u8>, usize)>> {
            Ok(self.dictionary.take())
        }

        fn next_data_page(&mut self) -> Result<Option<(DataPage, usize)>> {
            Ok(self.pages.pop())
        }
    }

    fn single_optional_int32_metadata() -> FileMetadata {
        let mut root = StructBuilder::new("root", Repetition::Required);
        root.child(data("value", Repetition::Optional, crate::types::PhysicalType::Int32))
            .unwrap();
        let schema = Schema::new(root.build().unwrap()).unwrap();
        FileMetadata {
            version: 2,
            num_rows: 3,
            created_by: None,
            schema,
            row_groups: vec![RowGroupMetadata {
                num_rows: 3,
                columns: vec![ColumnChunkMetadata {
                    file_offset: 0,
                    num_values: 3,
                    compression: Compression::Uncompressed,
                    total_compressed_size: 0,
                    total_uncompressed_size: 0,
                    data_page_offset: 0,
                    dictionary_page_offset: None,
                    encodings: vec![Encoding::Plain],
                }],
            }],
        }
    }

    #[test]
    fn read_column_accumulates_until_num_values() {
        let metadata = single_optional_int32_metadata();
        let def_levels: Vec<u32> = vec![1, 0, 1];
        let mut buffer = Vec::new();
        encode_with_length(&def_levels, 1, &mut buffer);
        buffer.extend_from_slice(&10i32.to_le_bytes());
        buffer.extend_from_slice(&20i32.to_le_bytes());

        let page = DataPage {
            header: DataPageHeader::V1(DataPageHeaderV1 {
                num_values: 3,
                encoding: Encoding::Plain,
                definition_level_encoding: Encoding::Rle,
                repetition_level_encoding: Encoding::Rle,
            }),
            buffer,
            max_def_level: 1,
            max_rep_level: 0,
        };
        let mut source = VecPageSource {
            dictionary: None,
            pages: vec![(page, 0)],
        };

        let reader = Reader::open_reader(&metadata, ReaderOptions::default());
        let leaf_path = vec!["root".to_string(), "value".to_string()];
        let column = reader.read_column(0, &leaf_path, &mut source).unwrap();

        assert_eq!(column.values, vec![ScalarValue::Int32(10), ScalarValue::Int32(20)]);
        assert_eq!(column.def_levels, Some(vec![1, 0, 1]));
        assert_eq!(column.rep_levels, None);
    }

    #[test]
    fn read_row_group_rejects_source_count_mismatch() {
        let metadata = single_optional_int32_metadata();
        let reader = Reader::open_reader(&metadata, ReaderOptions::default());
        let result = reader.read_row_group(0, &mut []);
        assert!(matches!(result, Err(Error::LevelMismatch(_))));
    }
}
