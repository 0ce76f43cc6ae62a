use std::io::Write;

use super::write_cstr;

/// Label of the product entry that carries the archive prefix.
pub const PREFIX_LABEL: &str = "prefix";

/// Provenance blob written right after the `Vers` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductEntry {
    pub entry_name: String,
    pub product_name: String,
    pub product_version: String,
}

impl ProductEntry {
    pub fn prefix(prefix: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            entry_name: PREFIX_LABEL.to_string(),
            product_name: prefix.into(),
            product_version: version.into(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        self.entry_name.len() + self.product_name.len() + self.product_version.len() + 3
    }

    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        write_cstr(&mut w, self.entry_name.as_bytes())?;
        write_cstr(&mut w, self.product_name.as_bytes())?;
        write_cstr(&mut w, self.product_version.as_bytes())?;
        Ok(())
    }
}
