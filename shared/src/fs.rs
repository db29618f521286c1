//! Filesystem helpers shared across vgakit tools.

use std::path::Path;

use anyhow::{Context, Result};

/// Maximum allowed WAV size for reading into memory.
pub const MAX_WAV_BYTES: u64 = 64 * 1024 * 1024; // 64 MiB
/// Maximum allowed image size for reading into memory.
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024; // 32 MiB

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    let len = metadata.len();
    if len > max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            len,
            max_bytes
        );
    }
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write generated text, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, [0u8; 16]).unwrap();

        assert!(read_file_with_limit(&path, 8).is_err());
        assert_eq!(read_file_with_limit(&path, 16).unwrap().len(), 16);
    }

    #[test]
    fn write_text_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.h");

        write_text(&path, "// hi\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// hi\n");
    }
}
