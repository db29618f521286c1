//! C++ header generators
//!
//! Pure text formatting. Sample and pixel values are written exactly as
//! given; all numeric transforms happen before this point.

use anyhow::Result;
use std::fmt::Write as FmtWrite;
use vgakit_shared::VGA_HEADER_FORMAT;

use crate::audio::MonoClip;
use crate::config::HeaderOptions;
use crate::sprite::Sprite;

/// Include guard shared by every sound header unless unique guards are enabled.
pub const SOUND_GUARD: &str = "WAV_DATA_H";

/// Include guard for a sound header.
pub fn sound_guard(ident: &str, options: &HeaderOptions) -> String {
    if options.unique_guards {
        format!("WAV_{}_H", ident.to_uppercase())
    } else {
        SOUND_GUARD.to_string()
    }
}

/// Generate the header for a processed sound clip.
pub fn generate_sound_header(ident: &str, clip: &MonoClip, options: &HeaderOptions) -> Result<String> {
    let guard = sound_guard(ident, options);
    let namespace = format!("{}{}", VGA_HEADER_FORMAT.sound_prefix, ident);
    let mut output = String::new();

    writeln!(output, "#ifndef {}", guard)?;
    writeln!(output, "#define {}", guard)?;
    writeln!(output)?;
    writeln!(output, "#include <stdint.h>")?;
    writeln!(output)?;
    writeln!(output, "namespace {} {{", namespace)?;
    writeln!(output)?;

    writeln!(output, "    const uint32_t SAMPLE_RATE = {};", clip.sample_rate)?;
    // PC speaker output is always mono
    writeln!(output, "    const uint8_t NUM_CHANNELS = 1;")?;
    writeln!(output, "    const uint8_t BITS_PER_SAMPLE = {};", clip.width.bits())?;
    writeln!(output, "    const uint32_t NUM_SAMPLES = {};", clip.samples.len())?;
    writeln!(output)?;

    write!(
        output,
        "    const {} SAMPLES[NUM_SAMPLES] = {{\n        ",
        clip.width.c_type()
    )?;
    for (i, sample) in clip.samples.iter().enumerate() {
        if i > 0 {
            if i % VGA_HEADER_FORMAT.samples_per_line == 0 {
                write!(output, "\n        ")?;
            } else {
                write!(output, " ")?;
            }
        }
        write!(output, "{},", sample)?;
    }
    writeln!(output)?;
    writeln!(output, "    }};")?;
    writeln!(output)?;

    writeln!(output, "}} // namespace {}", namespace)?;
    writeln!(output)?;
    writeln!(output, "#endif // {}", guard)?;

    Ok(output)
}

/// Generate the header for a quantized sprite.
///
/// Binds `width`, `height` and `data` into a `cm::sprite_item` named `item`.
pub fn generate_sprite_header(ident: &str, sprite: &Sprite) -> Result<String> {
    let guard = format!("SPRITE_ITEM_{}_H", ident.to_uppercase());
    let mut output = String::new();

    writeln!(output, "#ifndef {}", guard)?;
    writeln!(output, "#define {}", guard)?;
    writeln!(output)?;

    writeln!(
        output,
        "namespace {}{} {{",
        VGA_HEADER_FORMAT.sprite_namespace_prefix, ident
    )?;
    writeln!(output, "const int width = {};", sprite.width)?;
    writeln!(output, "const int height = {};", sprite.height)?;
    writeln!(output, "const cm::pixel data[] = {{")?;

    let row = sprite.width.max(1) as usize;
    for (i, [r, g, b]) in sprite.pixels.iter().enumerate() {
        write!(output, "{{{}, {}, {}}},", r, g, b)?;
        if (i + 1) % row == 0 {
            writeln!(output)?;
        }
    }

    writeln!(output, "}};")?;
    writeln!(output, "const cm::sprite_item item = {{width, height, data}};")?;
    writeln!(output, "}}")?;
    writeln!(output)?;
    writeln!(output, "#endif // {}", guard)?;

    Ok(output)
}
