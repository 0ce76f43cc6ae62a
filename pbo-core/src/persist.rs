use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Permission bits of every written archive (rw-r--r--).
pub const ARCHIVE_MODE: u32 = 0o644;

/// Create or truncate `to` and write `bytes` in one go.
///
/// No temp-file-and-rename: a crash mid-write leaves a truncated archive.
pub fn write_archive(to: &Path, bytes: &[u8]) -> Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(ARCHIVE_MODE);
    }

    let mut f = opts.open(to)?;
    f.write_all(bytes)?;
    f.flush()?;
    info!(path = %to.display(), bytes = bytes.len(), "archive saved");
    Ok(())
}
