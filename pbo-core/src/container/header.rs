use std::io::Write;

use super::write_cstr;

/// Packing method of the leading format-marker header ("Vers").
pub const PACKING_VERS: u32 = 0x5665_7273;
/// Packing method of every stored file and of the terminator.
pub const PACKING_NONE: u32 = 0;
/// Fixed numeric tail following the null-terminated name.
pub const HEADER_TAIL_LEN: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderEntry {
    pub file_name: String,
    pub packing_method: u32,
    pub original_size: u32,
    pub reserved: u32,
    pub timestamp: u32,
    pub data_size: u32,
}

impl HeaderEntry {
    /// Marker that opens every archive: empty name, `Vers` packing, zero fields.
    pub fn vers() -> Self {
        Self {
            packing_method: PACKING_VERS,
            ..Self::default()
        }
    }

    /// All-zero entry closing the header table.
    pub fn terminator() -> Self {
        Self::default()
    }

    pub fn file(name: impl Into<String>, size: u32, timestamp: u32) -> Self {
        Self {
            file_name: name.into(),
            packing_method: PACKING_NONE,
            original_size: size,
            reserved: 0,
            timestamp,
            data_size: size,
        }
    }

    /// Number of bytes `write_to` emits for this entry.
    pub fn encoded_len(&self) -> usize {
        self.file_name.len() + 1 + HEADER_TAIL_LEN
    }

    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        write_cstr(&mut w, self.file_name.as_bytes())?;

        let mut tail = [0u8; HEADER_TAIL_LEN];
        tail[0..4].copy_from_slice(&self.packing_method.to_le_bytes());
        tail[4..8].copy_from_slice(&self.original_size.to_le_bytes());
        tail[8..12].copy_from_slice(&self.reserved.to_le_bytes());
        tail[12..16].copy_from_slice(&self.timestamp.to_le_bytes());
        tail[16..20].copy_from_slice(&self.data_size.to_le_bytes());
        w.write_all(&tail)
    }
}
