//! Small enums shared across modules that would otherwise each need their
//! own copy — repetition's wire-facing counterpart, compression codec
//! names, and the encodings a page header can declare.

/// The encodings a data page or dictionary page can declare itself to use.
/// `DELTA_*` and `BYTE_STREAM_SPLIT` are recognized by name so the reader
/// can report `EncodingUnsupported` instead of misreading the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Rle,
    RleDictionary,
    DeltaBinaryPacked,
    DeltaByteArray,
    DeltaLengthByteArray,
    ByteStreamSplit,
}

impl Encoding {
    pub fn is_supported(self) -> bool {
        matches!(self, Encoding::Plain | Encoding::Rle | Encoding::RleDictionary)
    }
}

/// Compression codec a column chunk declares for its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Uncompressed,
    Snappy,
    Gzip,
    Brotli,
    Lz4,
    Zstd,
}
