//! Directory build orchestration
//!
//! Walks the configured image and audio directories (top level only, sorted
//! by file name), converts each file independently and records what happened
//! to it. A file that cannot be converted is skipped; only I/O failures abort
//! the run.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vgakit_shared::{VGA_HEADER_FORMAT, ident_for_file};
use walkdir::WalkDir;

use crate::config::ExportConfig;
use crate::outcome::{ExportOutcome, SkipReason};
use crate::{audio, sprite};

/// Which converter handled a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Sprite,
    Sound,
}

impl AssetKind {
    fn name_prefix(self) -> &'static str {
        match self {
            AssetKind::Sprite => VGA_HEADER_FORMAT.sprite_namespace_prefix,
            AssetKind::Sound => VGA_HEADER_FORMAT.sound_prefix,
        }
    }

    fn accepts(self, path: &Path) -> bool {
        match self {
            AssetKind::Sprite => image::ImageFormat::from_path(path).is_ok(),
            AssetKind::Sound => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("wav")),
        }
    }

    fn output_file_name(self, ident: &str) -> String {
        match self {
            AssetKind::Sprite => VGA_HEADER_FORMAT.sprite_file_name(ident),
            AssetKind::Sound => VGA_HEADER_FORMAT.sound_file_name(ident),
        }
    }
}

/// One processed input file.
#[derive(Debug)]
pub struct ExportRecord {
    pub input: PathBuf,
    pub kind: AssetKind,
    pub outcome: ExportOutcome,
}

/// Everything a build did, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<ExportRecord>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_written()).count()
    }

    pub fn skipped(&self) -> usize {
        self.records.len() - self.written()
    }

    pub fn skipped_records(&self) -> impl Iterator<Item = (&Path, &SkipReason)> {
        self.records.iter().filter_map(|r| match &r.outcome {
            ExportOutcome::Skipped(reason) => Some((r.input.as_path(), reason)),
            ExportOutcome::Written(_) => None,
        })
    }
}

/// List regular files directly inside `dir`, sorted by file name.
pub fn list_asset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list directory: {:?}", dir))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Build every asset the configuration points at.
pub fn build_all(config: &ExportConfig) -> Result<RunSummary> {
    let output_dir = &config.output.dir;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut summary = RunSummary::default();

    let images = config.input.images_dir();
    if images.is_dir() {
        export_dir(config, AssetKind::Sprite, images, &mut summary)?;
    } else if config.input.images.is_some() {
        anyhow::bail!("Image directory not found: {:?}", images);
    } else {
        tracing::warn!("No image directory at {:?}, skipping sprites", images);
    }

    let sounds = config.input.audio_dir();
    if sounds.is_dir() {
        export_dir(config, AssetKind::Sound, sounds, &mut summary)?;
    } else if config.input.audio.is_some() {
        anyhow::bail!("Audio directory not found: {:?}", sounds);
    } else {
        tracing::warn!("No audio directory at {:?}, skipping sounds", sounds);
    }

    Ok(summary)
}

fn export_dir(
    config: &ExportConfig,
    kind: AssetKind,
    dir: &Path,
    summary: &mut RunSummary,
) -> Result<()> {
    // Lowercased identifier -> first file that produced it
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for input in list_asset_files(dir)? {
        tracing::info!("- importing {:?}", input);
        let outcome = export_file(config, kind, &input, &mut seen)?;

        match &outcome {
            ExportOutcome::Written(output) => tracing::info!("  -> {:?}", output),
            ExportOutcome::Skipped(reason) => tracing::warn!("Skipped {:?}: {}", input, reason),
        }

        summary.records.push(ExportRecord {
            input,
            kind,
            outcome,
        });
    }
    Ok(())
}

fn export_file(
    config: &ExportConfig,
    kind: AssetKind,
    input: &Path,
    seen: &mut HashMap<String, PathBuf>,
) -> Result<ExportOutcome> {
    if !kind.accepts(input) {
        return Ok(ExportOutcome::Skipped(SkipReason::UnsupportedExtension));
    }

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let ident = match ident_for_file(&file_name, kind.name_prefix()) {
        Ok(ident) => ident,
        Err(e) => return Ok(ExportOutcome::Skipped(SkipReason::InvalidName(e))),
    };

    // Include guards are uppercased, so names differing only in case collide
    let key = ident.to_ascii_lowercase();
    if let Some(first) = seen.get(&key) {
        return Ok(ExportOutcome::Skipped(SkipReason::DuplicateIdent {
            ident,
            first: first.clone(),
        }));
    }

    let output = config.output.dir.join(kind.output_file_name(&ident));
    let outcome = match kind {
        AssetKind::Sprite => sprite::convert_image(input, &output, &ident),
        AssetKind::Sound => audio::convert_wav(
            input,
            &output,
            &ident,
            &config.audio,
            &config.output.header_options(),
        ),
    }
    .with_context(|| format!("Failed to export {:?}", input))?;

    if outcome.is_written() {
        seen.insert(key, input.to_path_buf());
    }
    Ok(outcome)
}
