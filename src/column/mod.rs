//! Column chunk reading and writing: the glue between raw pages and the
//! per-leaf decoded/encoded value streams the assembler consumes/produces.

pub mod reader;
pub mod writer;

pub use reader::{get_bit_width, ColumnChunkReader};
pub use writer::ColumnChunkWriter;
