//! Column chunk writer: derives levels from a nested `Value` against the
//! schema, PLAIN-encodes the present scalars, and emits one uncompressed
//! V1 data page. Lowest implementation priority per the design notes —
//! dictionary encoding and multi-page chunking are left to the reader-side
//! `Encoding::RleDictionary` support rather than duplicated here.

use crate::assembler::{ScalarValue, Value};
use crate::encoding::hybrid_rle::encode_with_length;
use crate::error::{Error, Result};
use crate::page::{DataPage, DataPageHeader, DataPageHeaderV1};
use crate::parquet_bridge::Encoding;
use crate::schema::ColumnDescriptor;

use super::reader::get_bit_width;

pub struct ColumnChunkWriter<'a> {
    descriptor: &'a ColumnDescriptor,
}

impl<'a> ColumnChunkWriter<'a> {
    pub fn new(descriptor: &'a ColumnDescriptor) -> Self {
        Self { descriptor }
    }

    /// Flattens `records` (one `Value` per top-level row) into
    /// `(def_levels, rep_levels, values)`, the writer-side mirror of
    /// `assembler::assemble_leaf`.
    fn flatten(&self, records: &[Value]) -> Result<(Vec<i16>, Vec<i16>, Vec<ScalarValue>)> {
        let mut def_levels = Vec::new();
        let mut rep_levels = Vec::new();
        let mut values = Vec::new();
        let max_def = self.descriptor.max_def_level();

        for record in records {
            flatten_value(record, 0, 0, max_def, &mut def_levels, &mut rep_levels, &mut values)?;
        }
        Ok((def_levels, rep_levels, values))
    }

    /// Builds one uncompressed V1 data page for `records`.
    pub fn write_page(&self, records: &[Value]) -> Result<DataPage> {
        let (def_levels, rep_levels, values) = self.flatten(records)?;
        let max_def = self.descriptor.max_def_level();
        let max_rep = self.descriptor.max_rep_level();

        let mut buffer = Vec::new();
        if max_rep > 0 {
            let rep_u32: Vec<u32> = rep_levels.iter().map(|&v| v as u32).collect();
            encode_with_length(&rep_u32, get_bit_width(max_rep), &mut buffer);
        }
        if max_def > 0 {
            let def_u32: Vec<u32> = def_levels.iter().map(|&v| v as u32).collect();
            encode_with_length(&def_u32, get_bit_width(max_def), &mut buffer);
        }
        for value in &values {
            encode_plain(value, &mut buffer)?;
        }

        Ok(DataPage {
            header: DataPageHeader::V1(DataPageHeaderV1 {
                num_values: def_levels.len().max(values.len()) as u32,
                encoding: Encoding::Plain,
                definition_level_encoding: Encoding::Rle,
                repetition_level_encoding: Encoding::Rle,
            }),
            buffer,
            max_def_level: max_def,
            max_rep_level: max_rep,
        })
    }
}

fn flatten_value(
    value: &Value,
    current_def: i16,
    current_rep: i16,
    max_def: i16,
    def_levels: &mut Vec<i16>,
    rep_levels: &mut Vec<i16>,
    values: &mut Vec<ScalarValue>,
) -> Result<()> {
    match value {
        Value::Null => {
            def_levels.push(current_def);
            rep_levels.push(current_rep);
        }
        Value::Scalar(scalar) => {
            def_levels.push(max_def);
            rep_levels.push(current_rep);
            values.push(scalar.clone());
        }
        Value::List(items) => {
            if items.is_empty() {
                def_levels.push(current_def + 1);
                rep_levels.push(current_rep);
            }
            for (i, item) in items.iter().enumerate() {
                let rep = if i == 0 { current_rep } else { current_rep + 1 };
                flatten_value(item, current_def + 1, rep, max_def, def_levels, rep_levels, values)?;
            }
        }
        Value::Struct(_) | Value::Map(_) => {
            return Err(Error::TypeMismatch(
                "column chunk writer expects a leaf's own flattened value, not a struct/map".to_string(),
            ));
        }
    }
    Ok(())
}

/// PLAIN-encodes one scalar. Booleans are excluded: PLAIN packs 8 of them
/// per byte, which only makes sense encoded as a batch, not one at a time —
/// out of scope for this writer (see the design notes on writer scope).
fn encode_plain(value: &ScalarValue, buffer: &mut Vec<u8>) -> Result<()> {
    match value {
        ScalarValue::Boolean(_) => {
            return Err(Error::EncodingUnsupported(
                "writer does not batch-encode PLAIN booleans".to_string(),
            ))
        }
        ScalarValue::Int32(v) => buffer.extend_from_slice(&v.to_le_bytes()),
        ScalarValue::Int64(v) => buffer.extend_from_slice(&v.to_le_bytes()),
        ScalarValue::Int96(v) => {
            buffer.extend_from_slice(&v.0[0].to_le_bytes());
            buffer.extend_from_slice(&v.0[1].to_le_bytes());
            buffer.extend_from_slice(&v.0[2].to_le_bytes());
        }
        ScalarValue::Float(v) => buffer.extend_from_slice(&v.to_le_bytes()),
        ScalarValue::Double(v) => buffer.extend_from_slice(&v.to_le_bytes()),
        ScalarValue::Bytes(bytes) => {
            buffer.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            buffer.extend_from_slice(bytes);
        }
        ScalarValue::Utf8(text) => {
            let bytes = text.as_bytes();
            buffer.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            buffer.extend_from_slice(bytes);
        }
        ScalarValue::Date(date) => {
            let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let days = (*date - epoch).num_days() as i32;
            buffer.extend_from_slice(&days.to_le_bytes());
        }
        ScalarValue::Timestamp(instant) => {
            buffer.extend_from_slice(&instant.timestamp_millis().to_le_bytes());
        }
    }
    Ok(())
}
