//! Compression codecs, feature-gated behind the same flags the teacher
//! crate uses (`snappy`, `gzip`, `brotli`, `lz4`, `zstd`). The column reader
//! and writer depend only on the `Codec` trait; which codec backs a given
//! `Compression` value is resolved once via `create_codec`.

use crate::error::Result;
use crate::parquet_bridge::Compression;

/// A (de)compression codec for a whole page body.
pub trait Codec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()>;
    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, uncompressed_size: usize) -> Result<()>;
}

/// Resolves a `Compression` value to a boxed codec, or `None` for
/// `Uncompressed`.
pub fn create_codec(compression: Compression) -> Result<Option<Box<dyn Codec>>> {
    match compression {
        Compression::Uncompressed => Ok(None),
        #[cfg(feature = "snappy")]
        Compression::Snappy => Ok(Some(Box::new(SnappyCodec))),
        #[cfg(not(feature = "snappy"))]
        Compression::Snappy => Err(unsupported_err("snappy")),
        #[cfg(feature = "gzip")]
        Compression::Gzip => Ok(Some(Box::new(GzipCodec))),
        #[cfg(not(feature = "gzip"))]
        Compression::Gzip => Err(unsupported_err("gzip")),
        #[cfg(feature = "brotli")]
        Compression::Brotli => Ok(Some(Box::new(BrotliCodec))),
        #[cfg(not(feature = "brotli"))]
        Compression::Brotli => Err(unsupported_err("brotli")),
        #[cfg(feature = "lz4")]
        Compression::Lz4 => Ok(Some(Box::new(Lz4Codec))),
        #[cfg(not(feature = "lz4"))]
        Compression::Lz4 => Err(unsupported_err("lz4")),
        #[cfg(feature = "zstd")]
        Compression::Zstd => Ok(Some(Box::new(ZstdCodec))),
        #[cfg(not(feature = "zstd"))]
        Compression::Zstd => Err(unsupported_err("zstd")),
    }
}

#[allow(dead_code)]
fn unsupported_err(name: &str) -> crate::error::Error {
    crate::error::Error::EncodingUnsupported(format!("codec '{}' not compiled in", name))
}

#[cfg(feature = "snappy")]
struct SnappyCodec;

#[cfg(feature = "snappy")]
impl Codec for SnappyCodec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let mut encoder = snap::raw::Encoder::new();
        let compressed = encoder
            .compress_vec(input)
            .map_err(|e| crate::error::Error::Malformed(format!("snappy compress failed: {}", e)))?;
        output.extend_from_slice(&compressed);
        Ok(())
    }

    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, uncompressed_size: usize) -> Result<()> {
        let mut decoder = snap::raw::Decoder::new();
        let start = output.len();
        output.resize(start + uncompressed_size, 0);
        decoder
            .decompress(input, &mut output[start..])
            .map_err(|e| crate::error::Error::Malformed(format!("snappy decompress failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(feature = "gzip")]
struct GzipCodec;

#[cfg(feature = "gzip")]
impl Codec for GzipCodec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        use std::io::Write;
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
        encoder.write_all(input)?;
        encoder.finish()?;
        Ok(())
    }

    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, _uncompressed_size: usize) -> Result<()> {
        use std::io::Read;
        let mut decoder = flate2::read::GzDecoder::new(input);
        decoder.read_to_end(output)?;
        Ok(())
    }
}

#[cfg(feature = "brotli")]
struct BrotliCodec;

#[cfg(feature = "brotli")]
impl Codec for BrotliCodec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let mut input = input;
        brotli::BrotliCompress(&mut input, output, &brotli::enc::BrotliEncoderParams::default())
            .map_err(|e| crate::error::Error::Malformed(format!("brotli compress failed: {}", e)))?;
        Ok(())
    }

    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, _uncompressed_size: usize) -> Result<()> {
        let mut input = input;
        brotli::BrotliDecompress(&mut input, output)
            .map_err(|e| crate::error::Error::Malformed(format!("brotli decompress failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(feature = "lz4")]
struct Lz4Codec;

#[cfg(feature = "lz4")]
impl Codec for Lz4Codec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        use std::io::Write;
        let mut encoder = lz4::EncoderBuilder::new().build(output)?;
        encoder.write_all(input)?;
        let (_, result) = encoder.finish();
        result?;
        Ok(())
    }

    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, _uncompressed_size: usize) -> Result<()> {
        use std::io::Read;
        let mut decoder = lz4::Decoder::new(input)?;
        decoder.read_to_end(output)?;
        Ok(())
    }
}

#[cfg(feature = "zstd")]
struct ZstdCodec;

#[cfg(feature = "zstd")]
impl Codec for ZstdCodec {
    fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let compressed = zstd::encode_all(input, 0)
            .map_err(|e| crate::error::Error::Malformed(format!("zstd compress failed: {}", e)))?;
        output.extend_from_slice(&compressed);
        Ok(())
    }

    fn decompress(&mut self, input: &[u8], output: &mut Vec<u8>, _uncompressed_size: usize) -> Result<()> {
        let decompressed = zstd::decode_all(input)
            .map_err(|e| crate::error::Error::Malformed(format!("zstd decompress failed: {}", e)))?;
        output.extend_from_slice(&decompressed);
        Ok(())
    }
}
