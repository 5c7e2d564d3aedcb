//! Reads one column chunk's pages into a flat `(values, def_levels,
//! rep_levels)` triple ready for `assembler::assemble_leaf`.

use crate::assembler::ScalarValue;
use crate::compression::create_codec;
use crate::encoding::hybrid_rle::HybridRleDecoder;
use crate::error::{Error, Result};
use crate::options::ReaderOptions;
use crate::page::{split_buffer, DataPage, DictPage};
use crate::parquet_bridge::{Compression, Encoding};
use crate::schema::ColumnDescriptor;
use crate::types::{date_from_days, timestamp_from_int64, Int96, LogicalType, PhysicalType};

/// Bit width needed to represent every value in `0..=max_level`, the same
/// derivation the teacher's `read/levels.rs::get_bit_width` uses.
pub fn get_bit_width(max_level: i16) -> u32 {
    debug_assert!(max_level >= 0);
    32 - (max_level as u32).leading_zeros()
}

/// Decodes one data page into its leaf's contribution: def levels, rep
/// levels (possibly empty, meaning "all zero"/no repetition), and the
/// values actually present.
pub struct DecodedPage {
    pub def_levels: Vec<i16>,
    pub rep_levels: Vec<i16>,
    pub values: Vec<ScalarValue>,
}

pub struct ColumnChunkReader<'a> {
    descriptor: &'a ColumnDescriptor,
    options: ReaderOptions,
    dictionary: Option<Vec<ScalarValue>>,
}

impl<'a> ColumnChunkReader<'a> {
    pub fn new(descriptor: &'a ColumnDescriptor, options: ReaderOptions) -> Self {
        Self {
            descriptor,
            options,
            dictionary: None,
        }
    }

    /// Decompresses and decodes a dictionary page's PLAIN-encoded values,
    /// storing them for later `RLE_DICTIONARY` data pages to index into.
    pub fn load_dictionary_page(
        &mut self,
        compressed: &[u8],
        uncompressed_size: usize,
        compression: Compression,
    ) -> Result<()> {
        let bytes = decompress(compressed, uncompressed_size, compression)?;
        let page = DictPage {
            num_values: bytes.len(),
            is_sorted: false,
            buffer: bytes,
        };
        self.dictionary = Some(decode_plain_values(
            &page.buffer,
            self.descriptor.physical_type(),
            self.descriptor.logical_type(),
            self.options.treat_byte_array_as_utf8,
            usize::MAX,
        )?);
        Ok(())
    }

    /// Decompresses and decodes one data page.
    pub fn read_page(
        &self,
        page: &DataPage,
        compression: Compression,
        uncompressed_size: usize,
    ) -> Result<DecodedPage> {
        let max_def = self.descriptor.max_def_level();
        let max_rep = self.descriptor.max_rep_level();
        let num_values = page.num_values();

        let decompressed;
        let (rep_bytes, def_bytes, value_bytes) = if compression == Compression::Uncompressed {
            split_buffer(page)?
        } else {
            decompressed = decompress_page(page, compression, uncompressed_size)?;
            split_buffer(&with_buffer(page, &decompressed))?
        };

        let rep_levels = if max_rep > 0 {
            HybridRleDecoder::new(rep_bytes, get_bit_width(max_rep), num_values)
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .map(|v| v as i16)
                .collect()
        } else {
            Vec::new()
        };

        let def_levels: Vec<i16> = if max_def > 0 {
            HybridRleDecoder::new(def_bytes, get_bit_width(max_def), num_values)
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .map(|v| v as i16)
                .collect()
        } else {
            vec![max_def; num_values]
        };

        let num_present = def_levels.iter().filter(|&&d| d == max_def).count();

        let values = match page.encoding() {
            Encoding::Plain => decode_plain_values(
                value_bytes,
                self.descriptor.physical_type(),
                self.descriptor.logical_type(),
                self.options.treat_byte_array_as_utf8,
                num_present,
            )?,
            Encoding::RleDictionary => {
                let dictionary = self
                    .dictionary
                    .as_ref()
                    .ok_or_else(|| malformed_err!("RLE_DICTIONARY page without a dictionary page"))?;
                decode_dictionary_indices(value_bytes, dictionary, num_present)?
            }
            other => return Err(Error::EncodingUnsupported(format!("{:?}", other))),
        };

        Ok(DecodedPage {
            def_levels,
            rep_levels,
            values,
        })
    }
}

fn decompress_page(page: &DataPage, compression: Compression, uncompressed_size: usize) -> Result<Vec<u8>> {
    decompress(&page.buffer, uncompressed_size, compression)
}

fn decompress(bytes: &[u8], uncompressed_size: usize, compression: Compression) -> Result<Vec<u8>> {
    match create_codec(compression)? {
        None => Ok(bytes.to_vec()),
        Some(mut codec) => {
            let mut scratch = crate::buffer_pool::rent();
            let output = scratch.get_mut();
            output.reserve(uncompressed_size);
            codec.decompress(bytes, output, uncompressed_size)?;
            Ok(output.clone())
        }
    }
}

fn with_buffer(page: &DataPage, buffer: &[u8]) -> DataPage {
    DataPage {
        header: page.header,
        buffer: buffer.to_vec(),
        max_def_level: page.max_def_level,
        max_rep_level: page.max_rep_level,
    }
}

fn decode_dictionary_indices(
    bytes: &[u8],
    dictionary: &[ScalarValue],
    num_values: usize,
) -> Result<Vec<ScalarValue>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let bit_width = bytes[0] as u32;
    let indices: Vec<u32> = HybridRleDecoder::new(&bytes[1..], bit_width, num_values).collect::<Result<Vec<_>>>()?;
    indices
        .into_iter()
        .map(|idx| {
            dictionary
                .get(idx as usize)
                .cloned()
                .ok_or_else(|| malformed_err!("dictionary index {} out of range", idx))
        })
        .collect()
}

/// Decodes PLAIN-encoded bytes into scalars, applying `logical_type` (and,
/// for unannotated `ByteArray` columns, `treat_byte_array_as_utf8`) to
/// reinterpret the raw wire value rather than hand back its bare physical
/// representation.
fn decode_plain_values(
    bytes: &[u8],
    physical_type: PhysicalType,
    logical_type: Option<LogicalType>,
    treat_byte_array_as_utf8: bool,
    max_values: usize,
) -> Result<Vec<ScalarValue>> {
    let mut values = Vec::new();
    let mut offset = 0usize;

    while offset < bytes.len() && values.len() < max_values {
        match physical_type {
            PhysicalType::Boolean => {
                // PLAIN-encoded booleans are bit-packed LSB-first, one byte per 8 values.
                let remaining_values = max_values - values.len();
                let byte = bytes[offset];
                for bit in 0..8.min(remaining_values) {
                    values.push(ScalarValue::Boolean((byte >> bit) & 1 == 1));
                }
                offset += 1;
            }
            PhysicalType::Int32 => {
                let v = i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
                values.push(match logical_type {
                    Some(LogicalType::Date) => ScalarValue::Date(date_from_days(v)?),
                    _ => ScalarValue::Int32(v),
                });
                offset += 4;
            }
            PhysicalType::Int64 => {
                let v = i64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap());
                values.push(match logical_type {
                    Some(LogicalType::Timestamp { unit, .. }) => {
                        ScalarValue::Timestamp(timestamp_from_int64(v, unit)?)
                    }
                    _ => ScalarValue::Int64(v),
                });
                offset += 8;
            }
            PhysicalType::Int96 => {
                // INT96 predates the TIMESTAMP logical type and carries no
                // annotation of its own in practice; every INT96 column is a
                // legacy (nanos-of-day, Julian day) timestamp.
                let v = Int96::from_le_bytes(bytes[offset..offset + 12].try_into().unwrap());
                values.push(ScalarValue::Timestamp(v.to_timestamp()?));
                offset += 12;
            }
            PhysicalType::Float => {
                let v = f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
                values.push(ScalarValue::Float(v));
                offset += 4;
            }
            PhysicalType::Double => {
                let v = f64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap());
                values.push(ScalarValue::Double(v));
                offset += 8;
            }
            PhysicalType::ByteArray => {
                let len = u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap()) as usize;
                offset += 4;
                let raw = bytes[offset..offset + len].to_vec();
                let as_utf8 = match logical_type {
                    Some(LogicalType::Utf8) | Some(LogicalType::Enum) => true,
                    None => treat_byte_array_as_utf8,
                    _ => false,
                };
                values.push(if as_utf8 {
                    ScalarValue::Utf8(String::from_utf8(raw).map_err(|_| malformed_err!("byte array is not valid UTF-8"))?)
                } else {
                    ScalarValue::Bytes(raw)
                });
                offset += len;
            }
            PhysicalType::FixedLenByteArray(len) => {
                values.push(ScalarValue::Bytes(bytes[offset..offset + len].to_vec()));
                offset += len;
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_width_boundaries() {
        assert_eq!(get_bit_width(0), 0);
        assert_eq!(get_bit_width(1), 1);
        assert_eq!(get_bit_width(2), 2);
        assert_eq!(get_bit_width(3), 2);
        assert_eq!(get_bit_width(4), 3);
    }

    #[test]
    fn plain_int32_roundtrip() {
        let bytes: Vec<u8> = [1i32, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let values = decode_plain_values(&bytes, PhysicalType::Int32, None, false, 3).unwrap();
        assert_eq!(
            values,
            vec![
                ScalarValue::Int32(1),
                ScalarValue::Int32(2),
                ScalarValue::Int32(3)
            ]
        );
    }

    #[test]
    fn plain_byte_array_roundtrip() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(b"abc");
        let values = decode_plain_values(&bytes, PhysicalType::ByteArray, None, false, 1).unwrap();
        assert_eq!(values, vec![ScalarValue::Bytes(b"abc".to_vec())]);
    }

    #[test]
    fn plain_byte_array_as_utf8_when_requested() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(b"abc");
        let values = decode_plain_values(&bytes, PhysicalType::ByteArray, None, true, 1).unwrap();
        assert_eq!(values, vec![ScalarValue::Utf8("abc".to_string())]);
    }

    #[test]
    fn plain_int32_as_date_when_annotated() {
        // 2017-01-01, the `dates.parquet` seed scenario.
        let bytes = 17167i32.to_le_bytes();
        let values = decode_plain_values(&bytes, PhysicalType::Int32, Some(LogicalType::Date), false, 1).unwrap();
        assert_eq!(values.len(), 1);
        match &values[0] {
            ScalarValue::Date(d) => assert_eq!(d.to_string(), "2017-01-01"),
            other => panic!("expected a Date scalar, got {:?}", other),
        }
    }

    #[test]
    fn plain_int96_always_decodes_as_timestamp() {
        // 2018-12-14T00:00:00Z, the `datetime_other_system.parquet` seed scenario,
        // expressed as (nanos-of-day, Julian day).
        let julian_day = 2_458_467u32; // 2018-12-14
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&julian_day.to_le_bytes());
        let values = decode_plain_values(&bytes, PhysicalType::Int96, None, false, 1).unwrap();
        assert_eq!(values.len(), 1);
        match &values[0] {
            ScalarValue::Timestamp(ts) => {
                assert_eq!(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), "2018-12-14T00:00:00")
            }
            other => panic!("expected a Timestamp scalar, got {:?}", other),
        }
    }
}
