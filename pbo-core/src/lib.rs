#![forbid(unsafe_code)]

//! Writer for PBO archives: a header table (`Vers` marker, product blob,
//! one header per file, zero terminator) followed by the raw file payloads
//! in header order. All numeric fields are little-endian `u32`.

pub mod error;
pub mod persist;

pub mod container {
    pub mod header;
    pub mod product;

    use std::io::Write;

    /// Raw bytes followed by a single NUL. No length prefix, no escaping.
    pub(crate) fn write_cstr(w: &mut impl Write, bytes: &[u8]) -> std::io::Result<()> {
        w.write_all(bytes)?;
        w.write_all(&[0])
    }
}

pub mod pack {
    pub mod walker;
    pub mod writer;
}

// Re-exports: stable API surface
pub use container::header::{HeaderEntry, PACKING_NONE, PACKING_VERS};
pub use container::product::{PREFIX_LABEL, ProductEntry};
pub use error::{PboError, Result};
pub use pack::writer::{GenerateStats, PackOptions, Pbo, pack};
