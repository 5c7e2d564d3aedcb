//! The RLE / bit-packed hybrid encoding used for definition levels,
//! repetition levels, and dictionary indices.
//!
//! Wire format: a sequence of runs, each introduced by a ULEB128 indicator.
//! `indicator & 1 == 0` is an RLE run: `indicator >> 1` is the repeat count,
//! followed by a single value stored as a fixed-width little-endian integer
//! (`width_for_max_value(2^bit_width - 1)` bytes). `indicator & 1 == 1` is a
//! bit-packed run: `indicator >> 1` is the number of groups of 8 values,
//! followed by `bit_width` bytes per group of 8, LSB-first.

use crate::encoding::{bitpacked::BitpackedDecoder, read_int_le, uleb128, width_for_max_value};
use crate::error::Result;

enum RunState<'a> {
    Rle { value: u32, remaining: usize },
    Bitpacked(std::iter::Take<BitpackedDecoder<'a>>),
    Done,
}

/// Streaming decoder over a hybrid RLE / bit-packed buffer, bounded to at
/// most `max_items` decoded values regardless of what the buffer encodes.
pub struct HybridRleDecoder<'a> {
    values: &'a [u8],
    bit_width: u32,
    remaining: usize,
    state: RunState<'a>,
}

impl<'a> HybridRleDecoder<'a> {
    pub fn new(values: &'a [u8], bit_width: u32, max_items: usize) -> Self {
        Self {
            values,
            bit_width,
            remaining: max_items,
            state: RunState::Done,
        }
    }

    fn load_run(&mut self) -> Result<()> {
        if self.values.is_empty() {
            self.state = RunState::Done;
            return Ok(());
        }
        let (indicator, consumed) = uleb128::decode(self.values)?;
        self.values = &self.values[consumed..];

        if indicator & 1 == 0 {
            let run_length = (indicator >> 1) as usize;
            let width = width_for_max_value(if self.bit_width == 0 {
                0
            } else {
                (1u32 << self.bit_width) - 1
            });
            if self.values.len() < width {
                return Err(malformed_err!("truncated RLE run value"));
            }
            let value = read_int_le(self.values, width);
            self.values = &self.values[width..];
            self.state = RunState::Rle {
                value,
                remaining: run_length,
            };
        } else {
            let groups = (indicator >> 1) as usize;
            let num_values = groups * 8;
            // A truncated tail (short trailing page) is not malformed: consume
            // whatever bytes are available and let `BitpackedDecoder` yield
            // however many full values fit, then stop.
            let byte_len = (groups * self.bit_width as usize).min(self.values.len());
            let (run_bytes, rest) = self.values.split_at(byte_len);
            self.values = rest;
            let decoder = BitpackedDecoder::try_new(run_bytes, self.bit_width)?.take(num_values);
            self.state = RunState::Bitpacked(decoder);
        }
        Ok(())
    }
}

impl<'a> Iterator for HybridRleDecoder<'a> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Result<u32>> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            match &mut self.state {
                RunState::Rle { value, remaining } if *remaining > 0 => {
                    *remaining -= 1;
                    let value = *value;
                    self.remaining -= 1;
                    return Some(Ok(value));
                }
                RunState::Bitpacked(iter) => {
                    if let Some(value) = iter.next() {
                        self.remaining -= 1;
                        return Some(Ok(value));
                    }
                    self.state = RunState::Done;
                }
                _ => {
                    if let Err(e) = self.load_run() {
                        self.remaining = 0;
                        return Some(Err(e));
                    }
                    if matches!(self.state, RunState::Done) {
                        return None;
                    }
                }
            }
        }
    }
}

/// Decodes up to `max_items` values from a hybrid RLE / bit-packed buffer
/// into a `Vec`, the convenience entry point used by callers that don't need
/// streaming.
pub fn decode(values: &[u8], bit_width: u32, max_items: usize) -> Result<Vec<u32>> {
    HybridRleDecoder::new(values, bit_width, max_items).collect()
}

/// Encodes `values` at `bit_width` bits each using RLE runs only (no
/// bit-packed runs): every maximal run of equal adjacent values becomes one
/// RLE run. This produces valid, spec-conformant output at the cost of
/// density when values alternate; see the module-level open question this
/// mirrors in the design notes.
pub fn encode(values: &[u32], bit_width: u32, buffer: &mut Vec<u8>) {
    let width = width_for_max_value(if bit_width == 0 {
        0
    } else {
        (1u32 << bit_width) - 1
    });

    let mut iter = values.iter().peekable();
    while let Some(&value) = iter.next() {
        let mut run_length = 1usize;
        while let Some(&&next) = iter.peek() {
            if next == value {
                run_length += 1;
                iter.next();
            } else {
                break;
            }
        }
        uleb128::encode((run_length as u32) << 1, buffer);
        crate::encoding::write_int_le(value, width, buffer);
    }
}

/// Encodes `values` and prefixes the result with its own length as a 4-byte
/// little-endian integer, the framing V1 data pages use for the definition
/// and repetition level streams.
pub fn encode_with_length(values: &[u32], bit_width: u32, buffer: &mut Vec<u8>) {
    let mut body = Vec::new();
    encode(values, bit_width, &mut body);
    buffer.extend_from_slice(&(body.len() as u32).to_le_bytes());
    buffer.extend_from_slice(&body);
}
