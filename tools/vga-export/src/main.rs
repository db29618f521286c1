//! vga-export - vgakit asset export tool
//!
//! Converts raw assets (WAV, PNG, JPG, BMP, GIF) to C++ headers
//! (wav_<name>.h, sprite_item_<name>.h)

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vgakit_shared::{VGA_HEADER_FORMAT, ident_for_file, validate_ident};

// Use modules from library
use vga_export::{ExportOutcome, audio, config, pipeline, sprite};

#[derive(Parser)]
#[command(name = "vga-export")]
#[command(about = "vgakit asset export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every image and WAV file in the input directories
    Build {
        /// Path to vga.toml config (default: ./vga.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Image directory (overrides config)
        #[arg(long)]
        images: Option<PathBuf>,

        /// Audio directory (overrides config)
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate config without building
    Check {
        /// Path to vga.toml config (default: ./vga.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Export a single image file
    Image {
        /// Input image file
        input: PathBuf,

        /// Output header (default: sprite_item_<name>.h next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Identifier used in the namespace (default: derived from file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Export a single WAV file
    Audio {
        /// Input WAV file
        input: PathBuf,

        /// Output header (default: wav_<name>.h next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Identifier used in the namespace (default: derived from file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Path to vga.toml config for audio settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            images,
            audio,
            output,
        } => {
            let mut config = config::load_config_or_default(config.as_deref())?;
            if images.is_some() {
                config.input.images = images;
            }
            if audio.is_some() {
                config.input.audio = audio;
            }
            if let Some(output) = output {
                config.output.dir = output;
            }
            config::validate(&config)?;

            tracing::info!("Building assets into {:?}", config.output.dir);
            let summary = pipeline::build_all(&config)?;
            tracing::info!(
                "Build complete! {} written, {} skipped",
                summary.written(),
                summary.skipped()
            );
        }

        Commands::Check { config } => {
            tracing::info!("Checking config {:?}", config);
            let config = config::load_config_or_default(config.as_deref())?;
            config::validate(&config)?;
            tracing::info!("Config is valid!");
        }

        Commands::Image {
            input,
            output,
            name,
        } => {
            let ident = resolve_ident(&input, name, VGA_HEADER_FORMAT.sprite_namespace_prefix)?;
            let output = output.unwrap_or_else(|| {
                sibling(&input, &VGA_HEADER_FORMAT.sprite_file_name(&ident))
            });
            tracing::info!("Converting {:?} -> {:?}", input, output);
            report(sprite::convert_image(&input, &output, &ident)?)?;
        }

        Commands::Audio {
            input,
            output,
            name,
            config,
        } => {
            let config = config::load_config_or_default(config.as_deref())?;
            config::validate(&config)?;
            let ident = resolve_ident(&input, name, VGA_HEADER_FORMAT.sound_prefix)?;
            let output = output
                .unwrap_or_else(|| sibling(&input, &VGA_HEADER_FORMAT.sound_file_name(&ident)));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            report(audio::convert_wav(
                &input,
                &output,
                &ident,
                &config.audio,
                &config.output.header_options(),
            )?)?;
        }
    }

    Ok(())
}

/// Use `--name` if given, otherwise derive the identifier from the file name.
fn resolve_ident(input: &Path, name: Option<String>, prefix: &str) -> Result<String> {
    match name {
        Some(name) => {
            validate_ident(&format!("{prefix}{name}"))?;
            Ok(name)
        }
        None => {
            let file_name = input
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            Ok(ident_for_file(&file_name, prefix)?)
        }
    }
}

fn sibling(input: &Path, file_name: &str) -> PathBuf {
    input.with_file_name(file_name)
}

/// Single-file conversions treat a skip as failure.
fn report(outcome: ExportOutcome) -> Result<()> {
    match outcome {
        ExportOutcome::Written(_) => {
            tracing::info!("Done!");
            Ok(())
        }
        ExportOutcome::Skipped(reason) => anyhow::bail!("Nothing written: {}", reason),
    }
}
