//! Shared types for vgakit asset tools.

pub mod fs;
pub mod header_format;
pub mod ident;

pub use header_format::{HeaderFormat, VGA_HEADER_FORMAT};
pub use ident::{IdentError, asset_stem, ident_for_file, sanitize_stem, validate_ident};
