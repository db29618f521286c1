//! vga-export library
//!
//! Converts WAV and image assets into C++ headers for the VGA runtime.
//! Used by the `vga-export` binary and by integration tests.

pub mod audio;
pub mod config;
pub mod header;
pub mod outcome;
pub mod pipeline;
pub mod sprite;

pub use audio::{AudioClip, AudioError, MonoClip, SampleWidth};
pub use config::{AudioSettings, ExportConfig, HeaderOptions};
pub use outcome::{ExportOutcome, SkipReason};
pub use pipeline::{AssetKind, ExportRecord, RunSummary, build_all};
pub use sprite::Sprite;

// Re-export header format constants from shared
pub use vgakit_shared::{HeaderFormat, VGA_HEADER_FORMAT};
