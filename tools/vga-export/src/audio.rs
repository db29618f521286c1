//! Audio converter (WAV -> wav_<name>.h)
//!
//! The PC speaker driver plays a single channel at a low rate, so every clip
//! goes through the same three stages:
//!
//! 1. keep channel 0 of each interleaved frame
//! 2. decimate by an integer factor toward the target rate
//! 3. smooth with a centered moving average

use anyhow::Result;
use std::io::Cursor;
use std::path::Path;
use vgakit_shared::fs::{MAX_WAV_BYTES, read_file_with_limit, write_text};

use crate::config::{AudioSettings, HeaderOptions};
use crate::header::generate_sound_header;
use crate::outcome::{ExportOutcome, SkipReason};

/// Errors that make a WAV file unusable for export.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Unsupported sample width: {0} bytes (expected 1 or 2)")]
    UnsupportedSampleWidth(u16),

    #[error("Sample count {samples} is not a multiple of channel count {channels}")]
    MalformedFrames { samples: usize, channels: u16 },

    #[error("WAV contains no samples")]
    Empty,

    #[error("Failed to decode WAV: {0}")]
    Wav(#[from] hound::Error),
}

/// PCM sample encodings the header format can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    /// Unsigned 8-bit, stored as 0..=255
    U8,
    /// Signed 16-bit
    I16,
}

impl SampleWidth {
    pub fn bits(self) -> u8 {
        match self {
            SampleWidth::U8 => 8,
            SampleWidth::I16 => 16,
        }
    }

    /// C type used for the `SAMPLES` array.
    pub fn c_type(self) -> &'static str {
        match self {
            SampleWidth::U8 => "uint8_t",
            SampleWidth::I16 => "int16_t",
        }
    }
}

/// A decoded WAV file with interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub width: SampleWidth,
    pub samples: Vec<i32>,
}

/// Single-channel audio ready for header generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoClip {
    pub sample_rate: u32,
    pub width: SampleWidth,
    pub samples: Vec<i32>,
}

/// Decode WAV bytes, keeping 8-bit samples unsigned.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioClip, AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let width = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 8) => SampleWidth::U8,
        (hound::SampleFormat::Int, 16) => SampleWidth::I16,
        (_, bits) => return Err(AudioError::UnsupportedSampleWidth(bits.div_ceil(8))),
    };

    // hound hands 8-bit data back re-centred around zero
    let samples = match width {
        SampleWidth::U8 => reader
            .samples::<i8>()
            .map(|s| s.map(|s| s as i32 + 128))
            .collect::<Result<Vec<_>, _>>()?,
        SampleWidth::I16 => reader
            .samples::<i16>()
            .map(|s| s.map(i32::from))
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(AudioClip {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        width,
        samples,
    })
}

/// Keep only channel 0 of each interleaved frame.
pub fn select_first_channel(samples: &[i32], channels: u16) -> Result<Vec<i32>, AudioError> {
    if channels == 0 || samples.len() % channels as usize != 0 {
        return Err(AudioError::MalformedFrames {
            samples: samples.len(),
            channels,
        });
    }

    Ok(samples.iter().step_by(channels as usize).copied().collect())
}

/// Keep every Kth sample where `K = sample_rate / target_rate`.
///
/// Returns the decimated samples and the new rate. Audio at or below the
/// target comes back unchanged.
pub fn decimate(samples: &[i32], sample_rate: u32, target_rate: u32) -> (Vec<i32>, u32) {
    if sample_rate <= target_rate {
        return (samples.to_vec(), sample_rate);
    }

    let factor = sample_rate / target_rate;
    let decimated = samples.iter().step_by(factor as usize).copied().collect();
    (decimated, sample_rate / factor)
}

/// Centered moving average with edge windows clamped to the buffer.
///
/// Buffers no longer than the window are returned as-is. Means round toward
/// negative infinity.
pub fn moving_average(samples: &[i32], window: usize) -> Vec<i32> {
    if samples.len() <= window {
        return samples.to_vec();
    }

    let half = window / 2;
    (0..samples.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(samples.len());
            let span = &samples[start..end];
            let sum: i64 = span.iter().map(|&s| s as i64).sum();
            sum.div_euclid(span.len() as i64) as i32
        })
        .collect()
}

/// Run channel selection, decimation and smoothing over a decoded clip.
pub fn process(clip: &AudioClip, settings: &AudioSettings) -> Result<MonoClip, AudioError> {
    let mono = select_first_channel(&clip.samples, clip.channels)?;
    if mono.is_empty() {
        return Err(AudioError::Empty);
    }

    let (decimated, sample_rate) = decimate(&mono, clip.sample_rate, settings.target_rate);
    let samples = moving_average(&decimated, settings.smoothing_window);

    Ok(MonoClip {
        sample_rate,
        width: clip.width,
        samples,
    })
}

/// Convert a WAV file to a sound header.
///
/// Unsupported or malformed audio yields [`ExportOutcome::Skipped`] and
/// writes nothing. I/O failures are returned as errors.
pub fn convert_wav(
    input: &Path,
    output: &Path,
    ident: &str,
    settings: &AudioSettings,
    options: &HeaderOptions,
) -> Result<ExportOutcome> {
    let bytes = read_file_with_limit(input, MAX_WAV_BYTES)?;

    let decoded = decode_wav(&bytes)
        .and_then(|clip| process(&clip, settings).map(|mono| (clip, mono)));
    let (source, mono) = match decoded {
        Ok(pair) => pair,
        Err(e) => return Ok(ExportOutcome::Skipped(SkipReason::Audio(e))),
    };

    let header = generate_sound_header(ident, &mono, options)?;
    write_text(output, &header)?;

    tracing::info!(
        "Converted audio: {} -> {} samples ({}Hz x{} -> {}Hz mono, {}-bit)",
        source.samples.len(),
        mono.samples.len(),
        source.sample_rate,
        source.channels,
        mono.sample_rate,
        mono.width.bits()
    );

    Ok(ExportOutcome::Written(output.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes<S: hound::Sample + Copy>(spec: hound::WavSpec, samples: &[S]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn spec(channels: u16, rate: u32, bits: u16) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: bits,
            sample_format: hound::SampleFormat::Int,
        }
    }

    #[test]
    fn test_select_first_channel_stereo() {
        let interleaved = vec![1, -1, 2, -2, 3, -3];
        assert_eq!(select_first_channel(&interleaved, 2).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_first_channel_mono_identity() {
        let samples = vec![5, 6, 7];
        assert_eq!(select_first_channel(&samples, 1).unwrap(), samples);
    }

    #[test]
    fn test_select_first_channel_rejects_partial_frame() {
        let err = select_first_channel(&[1, 2, 3], 2).unwrap_err();
        assert!(matches!(
            err,
            AudioError::MalformedFrames {
                samples: 3,
                channels: 2
            }
        ));
        assert!(select_first_channel(&[1], 0).is_err());
    }

    #[test]
    fn test_decimate_halves_16k() {
        let samples: Vec<i32> = (0..10).collect();
        let (out, rate) = decimate(&samples, 16000, 8000);
        assert_eq!(rate, 8000);
        assert_eq!(out, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_decimate_floors_factor_and_rate() {
        // 44100 / 8000 = 5, 44100 / 5 = 8820
        let samples: Vec<i32> = (0..11).collect();
        let (out, rate) = decimate(&samples, 44100, 8000);
        assert_eq!(rate, 8820);
        assert_eq!(out, vec![0, 5, 10]);
    }

    #[test]
    fn test_decimate_count_is_ceil() {
        for len in 0..40usize {
            let samples = vec![0; len];
            let (out, _) = decimate(&samples, 24000, 8000);
            assert_eq!(out.len(), len.div_ceil(3));
        }
    }

    #[test]
    fn test_decimate_at_or_below_target_unchanged() {
        let samples = vec![1, 2, 3];
        assert_eq!(decimate(&samples, 8000, 8000), (samples.clone(), 8000));
        assert_eq!(decimate(&samples, 11025 / 2, 8000), (samples, 5512));
    }

    #[test]
    fn test_moving_average_edges_use_smaller_window() {
        let out = moving_average(&[0, 3, 6, 9], 3);
        // [0,3] -> 1, [0,3,6] -> 3, [3,6,9] -> 6, [6,9] -> 7
        assert_eq!(out, vec![1, 3, 6, 7]);
    }

    #[test]
    fn test_moving_average_constant_is_fixed_point() {
        let samples = vec![42; 17];
        assert_eq!(moving_average(&samples, 3), samples);
    }

    #[test]
    fn test_moving_average_floors_negative_means() {
        let out = moving_average(&[-1, -2, 0, 0], 3);
        // [-1,-2] -> -1.5 floors to -2
        assert_eq!(out[0], -2);
        assert_eq!(out[1], -1);
    }

    #[test]
    fn test_moving_average_short_buffer_untouched() {
        assert_eq!(moving_average(&[1, 100, 1], 3), vec![1, 100, 1]);
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_moving_average_preserves_length() {
        let samples: Vec<i32> = (0..50).map(|i| (i * 37) % 23 - 11).collect();
        assert_eq!(moving_average(&samples, 3).len(), samples.len());
    }

    #[test]
    fn test_decode_8bit_is_unsigned() {
        let bytes = wav_bytes(spec(1, 8000, 8), &[-128i8, 0, 127]);
        let clip = decode_wav(&bytes).unwrap();
        assert_eq!(clip.width, SampleWidth::U8);
        assert_eq!(clip.samples, vec![0, 128, 255]);
    }

    #[test]
    fn test_decode_16bit_is_signed() {
        let bytes = wav_bytes(spec(2, 22050, 16), &[-300i16, 300, i16::MIN, i16::MAX]);
        let clip = decode_wav(&bytes).unwrap();
        assert_eq!(clip.width, SampleWidth::I16);
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.samples, vec![-300, 300, -32768, 32767]);
    }

    #[test]
    fn test_decode_rejects_24bit() {
        let bytes = wav_bytes(spec(1, 8000, 24), &[1i32]);
        assert!(matches!(
            decode_wav(&bytes),
            Err(AudioError::UnsupportedSampleWidth(3))
        ));
    }

    #[test]
    fn test_decode_rejects_float() {
        let float_spec = hound::WavSpec {
            sample_format: hound::SampleFormat::Float,
            ..spec(1, 8000, 32)
        };
        let bytes = wav_bytes(float_spec, &[0.5f32]);
        assert!(matches!(
            decode_wav(&bytes),
            Err(AudioError::UnsupportedSampleWidth(4))
        ));
    }

    #[test]
    fn test_process_16k_mono() {
        let clip = AudioClip {
            sample_rate: 16000,
            channels: 1,
            width: SampleWidth::I16,
            samples: vec![100; 64],
        };
        let mono = process(&clip, &AudioSettings::default()).unwrap();
        assert_eq!(mono.sample_rate, 8000);
        assert_eq!(mono.samples.len(), 32);
        assert!(mono.samples.iter().all(|&s| s == 100));
    }

    #[test]
    fn test_process_rejects_empty() {
        let clip = AudioClip {
            sample_rate: 8000,
            channels: 1,
            width: SampleWidth::U8,
            samples: Vec::new(),
        };
        assert!(matches!(
            process(&clip, &AudioSettings::default()),
            Err(AudioError::Empty)
        ));
    }
}
