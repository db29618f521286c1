//! Per-file export results

use std::path::PathBuf;
use vgakit_shared::IdentError;

use crate::audio::AudioError;

/// Why a file produced no header.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Invalid asset name: {0}")]
    InvalidName(#[from] IdentError),

    #[error("Identifier `{ident}` already produced by {}", .first.display())]
    DuplicateIdent { ident: String, first: PathBuf },

    #[error("Unsupported file extension")]
    UnsupportedExtension,
}

/// Result of converting one asset file.
#[derive(Debug)]
pub enum ExportOutcome {
    /// Header written to this path
    Written(PathBuf),
    /// Nothing written
    Skipped(SkipReason),
}

impl ExportOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ExportOutcome::Written(_))
    }
}
