use std::io::Write;
use std::path::PathBuf;

use pbo_core::error::Result;
use pbo_core::pack::walker::{collect_files, rel_name};
use pbo_core::{PackOptions, pack};

pub fn handle_pack(
    from: PathBuf,
    to: PathBuf,
    prefix: String,
    product_version: String,
    deterministic: bool,
) -> Result<()> {
    let opts = PackOptions { deterministic };
    let stats = pack(&from, &to, &prefix, &product_version, Some(&opts))?;
    eprintln!(
        "pack: {} files, {} payload bytes, {} bytes total -> {}",
        stats.files,
        stats.payload_bytes,
        stats.total_bytes,
        to.display()
    );
    Ok(())
}

pub fn handle_files(from: PathBuf) -> Result<()> {
    let files = collect_files(&from)?;
    let mut out = std::io::stdout().lock();
    for f in &files {
        writeln!(out, "{}", rel_name(&from, f)?)?;
    }
    Ok(())
}
