//! Page headers and the buffers they frame.
//!
//! Grounded on the teacher's `page/mod.rs` `DataPageHeader` split and
//! `read/levels.rs`'s `split_buffer_v1`/`split_buffer_v2`, generalized here
//! into one `split_buffer` that dispatches on header kind.

use crate::error::Result;
use crate::parquet_bridge::Encoding;

/// A V1 data page stores rep/def levels length-prefixed, back to back, ahead
/// of the value bytes.
#[derive(Debug, Clone, Copy)]
pub struct DataPageHeaderV1 {
    pub num_values: u32,
    pub encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub repetition_level_encoding: Encoding,
}

/// A V2 data page carries its rep/def level lengths directly in the header
/// and stores the levels uncompressed, ahead of the (possibly compressed)
/// value bytes.
#[derive(Debug, Clone, Copy)]
pub struct DataPageHeaderV2 {
    pub num_values: u32,
    pub num_nulls: u32,
    pub num_rows: u32,
    pub encoding: Encoding,
    pub def_levels_byte_length: u32,
    pub rep_levels_byte_length: u32,
    pub is_compressed: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum DataPageHeader {
    V1(DataPageHeaderV1),
    V2(DataPageHeaderV2),
}

impl DataPageHeader {
    pub fn num_values(&self) -> u32 {
        match self {
            DataPageHeader::V1(h) => h.num_values,
            DataPageHeader::V2(h) => h.num_values,
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            DataPageHeader::V1(h) => h.encoding,
            DataPageHeader::V2(h) => h.encoding,
        }
    }

    pub fn definition_level_encoding(&self) -> Encoding {
        match self {
            DataPageHeader::V1(h) => h.definition_level_encoding,
            DataPageHeader::V2(_) => Encoding::Rle,
        }
    }

    pub fn repetition_level_encoding(&self) -> Encoding {
        match self {
            DataPageHeader::V1(h) => h.repetition_level_encoding,
            DataPageHeader::V2(_) => Encoding::Rle,
        }
    }
}

/// An uncompressed data page: header plus the raw (rep levels, def levels,
/// values) buffer, ready to decode.
#[derive(Debug, Clone)]
pub struct DataPage {
    pub header: DataPageHeader,
    pub buffer: Vec<u8>,
    pub max_def_level: i16,
    pub max_rep_level: i16,
}

impl DataPage {
    pub fn num_values(&self) -> usize {
        self.header.num_values() as usize
    }

    pub fn encoding(&self) -> Encoding {
        self.header.encoding()
    }

    pub fn definition_level_encoding(&self) -> Encoding {
        self.header.definition_level_encoding()
    }
}

/// A dictionary page: PLAIN-encoded values addressed by the dictionary
/// indices a later data page's `RLE_DICTIONARY`-encoded body stores.
#[derive(Debug, Clone)]
pub struct DictPage {
    pub buffer: Vec<u8>,
    pub num_values: usize,
    pub is_sorted: bool,
}

/// Splits a page's buffer into its (repetition levels, definition levels,
/// values) sections.
pub fn split_buffer(page: &DataPage) -> Result<(&[u8], &[u8], &[u8])> {
    match &page.header {
        DataPageHeader::V1(_) => split_buffer_v1(
            &page.buffer,
            page.max_rep_level > 0,
            page.max_def_level > 0,
        ),
        DataPageHeader::V2(h) => Ok(split_buffer_v2(
            &page.buffer,
            h.rep_levels_byte_length as usize,
            h.def_levels_byte_length as usize,
        )),
    }
}

fn split_buffer_v1(buffer: &[u8], has_rep: bool, has_def: bool) -> Result<(&[u8], &[u8], &[u8])> {
    let mut remaining = buffer;

    let rep = if has_rep {
        let (chunk, rest) = read_length_prefixed(remaining)?;
        remaining = rest;
        chunk
    } else {
        &[]
    };

    let def = if has_def {
        let (chunk, rest) = read_length_prefixed(remaining)?;
        remaining = rest;
        chunk
    } else {
        &[]
    };

    Ok((rep, def, remaining))
}

fn read_length_prefixed(buffer: &[u8]) -> Result<(&[u8], &[u8])> {
    if buffer.len() < 4 {
        return Err(malformed_err!("truncated length-prefixed level stream"));
    }
    let len = u32::from_le_bytes(buffer[0..4].try_into().unwrap()) as usize;
    let buffer = &buffer[4..];
    if buffer.len() < len {
        return Err(malformed_err!("level stream shorter than its declared length"));
    }
    Ok(buffer.split_at(len))
}

fn split_buffer_v2(buffer: &[u8], rep_len: usize, def_len: usize) -> (&[u8], &[u8], &[u8]) {
    let (rep, rest) = buffer.split_at(rep_len.min(buffer.len()));
    let (def, values) = rest.split_at(def_len.min(rest.len()));
    (rep, def, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_v1(num_values: u32) -> DataPageHeader {
        DataPageHeader::V1(DataPageHeaderV1 {
            num_values,
            encoding: Encoding::Plain,
            definition_level_encoding: Encoding::Rle,
            repetition_level_encoding: Encoding::Rle,
        })
    }

    #[test]
    fn v1_split_with_both_levels() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&2u32.to_le_bytes());
        buffer.extend_from_slice(&[0xaa, 0xbb]);
        buffer.extend_from_slice(&3u32.to_le_bytes());
        buffer.extend_from_slice(&[0x01, 0x02, 0x03]);
        buffer.extend_from_slice(&[9, 9, 9]);

        let page = DataPage {
            header: header_v1(3),
            buffer,
            max_def_level: 1,
            max_rep_level: 1,
        };
        let (rep, def, values) = split_buffer(&page).unwrap();
        assert_eq!(rep, &[0xaa, 0xbb]);
        assert_eq!(def, &[0x01, 0x02, 0x03]);
        assert_eq!(values, &[9, 9, 9]);
    }

    #[test]
    fn v1_split_no_levels_is_pure_values() {
        let page = DataPage {
            header: header_v1(3),
            buffer: vec![1, 2, 3],
            max_def_level: 0,
            max_rep_level: 0,
        };
        let (rep, def, values) = split_buffer(&page).unwrap();
        assert!(rep.is_empty());
        assert!(def.is_empty());
        assert_eq!(values, &[1, 2, 3]);
    }

    #[test]
    fn v2_split_uses_header_lengths() {
        let page = DataPage {
            header: DataPageHeader::V2(DataPageHeaderV2 {
                num_values: 3,
                num_nulls: 0,
                num_rows: 3,
                encoding: Encoding::Plain,
                def_levels_byte_length: 2,
                rep_levels_byte_length: 1,
                is_compressed: false,
            }),
            buffer: vec![0xaa, 0x01, 0x02, 9, 9, 9],
            max_def_level: 1,
            max_rep_level: 1,
        };
        let (rep, def, values) = split_buffer(&page).unwrap();
        assert_eq!(rep, &[0xaa]);
        assert_eq!(def, &[0x01, 0x02]);
        assert_eq!(values, &[9, 9, 9]);
    }
}
