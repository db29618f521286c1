//! Header format specification for vgakit generated assets.
//!
//! This module defines the `HeaderFormat` struct which serves as the single source of truth
//! for everything the generated C++ headers share with the runtime that includes them
//! (file naming, namespace prefixes, palette step, playback rate, line wrapping).
//!
//! # Example
//!
//! ```
//! use vgakit_shared::VGA_HEADER_FORMAT;
//!
//! assert_eq!(VGA_HEADER_FORMAT.header_ext, "h");
//! assert_eq!(VGA_HEADER_FORMAT.sound_file_name("boom"), "wav_boom.h");
//! assert_eq!(VGA_HEADER_FORMAT.sprite_file_name("noki"), "sprite_item_noki.h");
//! ```

/// Header format specification for a target runtime.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFormat {
    /// Generated file extension without dot (e.g., "h")
    pub header_ext: &'static str,

    /// Prefix for sound file names and namespaces (e.g., "wav_")
    pub sound_prefix: &'static str,

    /// Prefix for sprite file names (e.g., "sprite_item_")
    pub sprite_file_prefix: &'static str,

    /// Prefix for sprite namespaces (e.g., "sprite_")
    pub sprite_namespace_prefix: &'static str,

    /// Channel divisor used when quantizing to the palette
    pub palette_step: u8,

    /// Playback rate the PC speaker driver expects, in Hz
    pub target_sample_rate: u32,

    /// Moving-average window applied to decimated audio
    pub smoothing_window: usize,

    /// Sample values per line in sound arrays
    pub samples_per_line: usize,
}

impl HeaderFormat {
    /// Create a new header format specification.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        header_ext: &'static str,
        sound_prefix: &'static str,
        sprite_file_prefix: &'static str,
        sprite_namespace_prefix: &'static str,
        palette_step: u8,
        target_sample_rate: u32,
        smoothing_window: usize,
        samples_per_line: usize,
    ) -> Self {
        Self {
            header_ext,
            sound_prefix,
            sprite_file_prefix,
            sprite_namespace_prefix,
            palette_step,
            target_sample_rate,
            smoothing_window,
            samples_per_line,
        }
    }

    /// Number of levels per colour channel after quantization.
    pub const fn palette_levels(&self) -> u8 {
        u8::MAX / self.palette_step + 1
    }

    /// File name of the header generated for a sound asset.
    pub fn sound_file_name(&self, ident: &str) -> String {
        format!("{}{}.{}", self.sound_prefix, ident, self.header_ext)
    }

    /// File name of the header generated for a sprite asset.
    pub fn sprite_file_name(&self, ident: &str) -> String {
        format!("{}{}.{}", self.sprite_file_prefix, ident, self.header_ext)
    }
}

/// VGA / PC-speaker header format.
///
/// - Sounds: `wav_<name>.h`, namespace `wav_<name>`, 8000 Hz, 3-tap smoothing, 12 per line
/// - Sprites: `sprite_item_<name>.h`, namespace `sprite_<name>`, 6 levels per channel
pub const VGA_HEADER_FORMAT: HeaderFormat =
    HeaderFormat::new("h", "wav_", "sprite_item_", "sprite_", 51, 8000, 3, 12);
