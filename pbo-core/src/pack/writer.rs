use crate::container::header::HeaderEntry;
use crate::container::product::ProductEntry;
use crate::error::{PboError, Result};
use crate::pack::walker::{collect_files, rel_name};
use crate::persist::write_archive;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
pub struct PackOptions {
    /// When true, zero per-file timestamps for byte-identical output.
    pub deterministic: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub files: usize,
    pub payload_bytes: u64,
    pub total_bytes: u64,
}

/// In-memory PBO builder.
///
/// Holds the configuration (`from`, `to`, `prefix`, `version`) and owns the
/// output buffer. [`Pbo::generate`] rebuilds the buffer from scratch,
/// [`Pbo::save`] / [`Pbo::save_to`] persist it.
#[derive(Debug, Default)]
pub struct Pbo {
    buffer: Vec<u8>,
    pub from: PathBuf,
    pub to: PathBuf,
    pub prefix: String,
    pub version: String,
    pub options: PackOptions,
}

impl Pbo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Append one header entry to the buffer.
    pub fn write_header(&mut self, header: &HeaderEntry) -> Result<()> {
        header.write_to(&mut self.buffer)?;
        Ok(())
    }

    /// Append a product blob to the buffer (no header tail of its own).
    pub fn write_product(&mut self, product: &ProductEntry) -> Result<()> {
        product.write_to(&mut self.buffer)?;
        Ok(())
    }

    pub fn get_files(&self) -> Result<Vec<PathBuf>> {
        collect_files(&self.from)
    }

    fn stamp(&self) -> u32 {
        if self.options.deterministic {
            0
        } else {
            // truncated to the 32-bit header field
            OffsetDateTime::now_utc().unix_timestamp() as u32
        }
    }

    /// Rebuild the whole archive image in the buffer.
    ///
    /// On error the buffer holds a partial image and must not be saved.
    pub fn generate(&mut self) -> Result<GenerateStats> {
        self.buffer.clear();

        self.write_header(&HeaderEntry::vers())?;
        let product = ProductEntry::prefix(self.prefix.as_str(), self.version.as_str());
        self.write_product(&product)?;

        let files = self.get_files()?;

        // Pass 1: header table. Each file is opened only to stat it.
        let mut sizes: Vec<u32> = Vec::with_capacity(files.len());
        for path in &files {
            let len = {
                let f = File::open(path)?;
                f.metadata()?.len()
            };
            let size = u32::try_from(len).map_err(|_| PboError::TooLarge {
                path: path.clone(),
                size: len,
            })?;
            let name = rel_name(&self.from, path)?;
            let stamp = self.stamp();
            debug!(name = %name, size, stamp, "header");
            self.write_header(&HeaderEntry::file(name, size, stamp))?;
            sizes.push(size);
        }

        self.write_header(&HeaderEntry::terminator())?;

        // Pass 2: payloads, same order as the headers.
        let mut payload_bytes = 0u64;
        for (path, &size) in files.iter().zip(&sizes) {
            let mut f = File::open(path)?;
            let n = std::io::copy(&mut f, &mut self.buffer)?;
            if n != u64::from(size) {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "{} changed size during packing: header says {size}, copied {n}",
                        path.display()
                    ),
                )
                .into());
            }
            debug!(path = %path.display(), bytes = n, "payload");
            payload_bytes += n;
        }

        let stats = GenerateStats {
            files: files.len(),
            payload_bytes,
            total_bytes: self.buffer.len() as u64,
        };
        info!(
            from = %self.from.display(),
            files = stats.files,
            bytes = stats.total_bytes,
            "archive generated"
        );
        Ok(stats)
    }

    /// Persist the buffer to the configured `to`.
    pub fn save(&self) -> Result<()> {
        write_archive(&self.to, &self.buffer)
    }

    pub fn save_to(&self, to: &Path) -> Result<()> {
        write_archive(to, &self.buffer)
    }
}

/// Generate `from` into an archive and save it at `to`.
///
/// Nothing is written to `to` if generation fails.
pub fn pack(
    from: &Path,
    to: &Path,
    prefix: &str,
    version: &str,
    opts: Option<&PackOptions>,
) -> Result<GenerateStats> {
    let mut pbo = Pbo {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        prefix: prefix.to_string(),
        version: version.to_string(),
        options: opts.cloned().unwrap_or_default(),
        ..Pbo::default()
    };
    let stats = pbo.generate()?;
    pbo.save()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::header::HEADER_TAIL_LEN;
    use std::fs;

    fn marker_and_product_len(prefix: &str, version: &str) -> usize {
        HeaderEntry::vers().encoded_len() + ProductEntry::prefix(prefix, version).encoded_len()
    }

    #[test]
    fn new_builder_is_empty() {
        let pbo = Pbo::new();
        assert!(pbo.bytes().is_empty());
        assert!(pbo.prefix.is_empty());
        assert!(!pbo.options.deterministic);
    }

    #[test]
    fn write_header_appends() {
        let mut pbo = Pbo::new();
        pbo.write_header(&HeaderEntry::file("config.cpp", 24, 0))
            .unwrap();
        pbo.write_header(&HeaderEntry::terminator()).unwrap();
        assert_eq!(pbo.bytes().len(), 11 + HEADER_TAIL_LEN + 1 + HEADER_TAIL_LEN);
    }

    #[test]
    fn empty_dir_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut pbo = Pbo::new();
        pbo.from = dir.path().to_path_buf();
        pbo.prefix = "p".into();

        let stats = pbo.generate().unwrap();
        assert_eq!(stats.files, 0);
        assert_eq!(stats.payload_bytes, 0);

        let mut expected: Vec<u8> = Vec::new();
        HeaderEntry::vers().write_to(&mut expected).unwrap();
        ProductEntry::prefix("p", "").write_to(&mut expected).unwrap();
        HeaderEntry::terminator().write_to(&mut expected).unwrap();
        assert_eq!(pbo.bytes(), expected.as_slice());
        assert_eq!(stats.total_bytes, expected.len() as u64);
    }

    #[test]
    fn payload_follows_terminator_in_header_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"BBB").unwrap();
        fs::write(dir.path().join("a.txt"), b"aa").unwrap();

        let mut pbo = Pbo::new();
        pbo.from = dir.path().to_path_buf();
        pbo.options.deterministic = true;
        let stats = pbo.generate().unwrap();

        assert_eq!(stats.files, 2);
        assert_eq!(stats.payload_bytes, 5);

        let table = marker_and_product_len("", "")
            + HeaderEntry::file("a.txt", 2, 0).encoded_len()
            + HeaderEntry::file("b.txt", 3, 0).encoded_len()
            + HeaderEntry::terminator().encoded_len();
        assert_eq!(&pbo.bytes()[table..], b"aaBBB");
    }

    #[test]
    fn generate_resets_buffer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f"), b"data").unwrap();

        let mut pbo = Pbo::new();
        pbo.from = dir.path().to_path_buf();
        pbo.options.deterministic = true;

        pbo.generate().unwrap();
        let first = pbo.bytes().to_vec();
        pbo.generate().unwrap();
        assert_eq!(pbo.bytes(), first.as_slice());
        assert_eq!(pbo.into_bytes(), first);
    }

    #[test]
    fn missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut pbo = Pbo::new();
        pbo.from = dir.path().join("missing");
        assert!(pbo.generate().is_err());
    }

    #[test]
    fn pack_does_not_write_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pbo");
        let res = pack(&dir.path().join("missing"), &out, "x", "1", None);
        assert!(res.is_err());
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_aborts_generation() {
        use std::os::unix::fs::PermissionsExt;

        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), b"first").unwrap();
        fs::write(src.path().join("b.txt"), b"locked").unwrap();
        fs::write(src.path().join("c.txt"), b"last").unwrap();
        let locked = src.path().join("b.txt");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if File::open(&locked).is_ok() {
            // root ignores permission bits; covered by the dangling link case
            return;
        }

        let mut pbo = Pbo::new();
        pbo.from = src.path().to_path_buf();
        assert!(matches!(pbo.generate(), Err(PboError::Io(_))));

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("out.pbo");
        assert!(matches!(
            pack(src.path(), &dest, "x", "1", None),
            Err(PboError::Io(_))
        ));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_aborts_generation() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), b"first").unwrap();
        std::os::unix::fs::symlink(src.path().join("gone"), src.path().join("b.txt")).unwrap();
        fs::write(src.path().join("c.txt"), b"last").unwrap();

        let mut pbo = Pbo::new();
        pbo.from = src.path().to_path_buf();
        match pbo.generate() {
            Err(PboError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {other:?}"),
        }

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("out.pbo");
        assert!(pack(src.path(), &dest, "x", "1", None).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn file_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty");
        fs::write(&file, b"").unwrap();

        let mut pbo = Pbo::new();
        pbo.from = file;
        pbo.options.deterministic = true;
        assert!(matches!(pbo.generate(), Err(PboError::NotADirectory(_))));
    }
}
