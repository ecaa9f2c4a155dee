//! Click feedback played on every button press.
//!
//! The click is a short decaying tone synthesised at the output device's
//! sample rate. The output stream is opened once at startup and stays
//! running; `play` only rewinds a shared cursor, so it never blocks and
//! never fails once the stream exists.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SoundConfig;

/// Errors raised while opening the audio output.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No output device is available.
    #[error("No audio output device available")]
    NoDevice,

    /// The device did not report a usable configuration.
    #[error("Failed to query audio output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    /// The device uses a sample format we do not write.
    #[error("Unsupported audio sample format: {0}")]
    UnsupportedFormat(String),

    /// The output stream could not be created.
    #[error("Failed to build audio stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    /// The output stream could not be started.
    #[error("Failed to start audio stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Something that can make the click noise.
#[cfg_attr(test, mockall::automock)]
pub trait ClickSound {
    /// Start the click. Returns immediately.
    fn play(&mut self);
}

impl<T: ClickSound + ?Sized> ClickSound for Box<T> {
    fn play(&mut self) {
        (**self).play()
    }
}

/// Sound sink used when audio is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ClickSound for Silent {
    fn play(&mut self) {}
}

/// Click parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickSpec {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub volume: f32,
}

impl From<&SoundConfig> for ClickSpec {
    fn from(cfg: &SoundConfig) -> Self {
        Self {
            frequency_hz: cfg.frequency_hz,
            duration_ms: cfg.duration_ms,
            volume: cfg.volume.clamp(0.0, 1.0),
        }
    }
}

/// Render the click as mono samples at `sample_rate`.
///
/// A sine at `frequency_hz` with an exponential decay that has fallen to
/// under 1% by the end of the buffer.
pub fn synthesize_click(sample_rate: u32, spec: ClickSpec) -> Vec<f32> {
    let len = (u64::from(sample_rate) * u64::from(spec.duration_ms) / 1000) as usize;
    let rate = sample_rate as f32;
    let decay = 5.0 / len.max(1) as f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / rate;
            let envelope = (-(i as f32) * decay).exp();
            spec.volume * envelope * (std::f32::consts::TAU * spec.frequency_hz * t).sin()
        })
        .collect()
}

/// Click played through the default audio output via `cpal`.
pub struct CpalClick {
    /// Kept alive for as long as the click can be played.
    _stream: cpal::Stream,
    /// Next sample to emit, `None` while silent.
    cursor: Arc<Mutex<Option<usize>>>,
    device_name: String,
}

impl CpalClick {
    /// Open the default output device and start a silent stream on it.
    pub fn open(spec: ClickSpec) -> Result<Self, SoundError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SoundError::NoDevice)?;
        let device_name = device
            .name()
            .unwrap_or_else(|_| "unknown output device".to_string());

        let default_config = device.default_output_config()?;
        let format = default_config.sample_format();
        let config: StreamConfig = default_config.into();
        let samples: Arc<[f32]> = synthesize_click(config.sample_rate.0, spec).into();
        let cursor = Arc::new(Mutex::new(None));

        debug!(
            device = %device_name,
            ?format,
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "opening audio output"
        );

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, cursor.clone())?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, cursor.clone())?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, samples, cursor.clone())?,
            SampleFormat::I32 => build_stream::<i32>(&device, &config, samples, cursor.clone())?,
            other => return Err(SoundError::UnsupportedFormat(format!("{other:?}"))),
        };
        stream.play()?;

        Ok(Self {
            _stream: stream,
            cursor,
            device_name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl ClickSound for CpalClick {
    fn play(&mut self) {
        *self.cursor.lock() = Some(0);
    }
}

impl std::fmt::Debug for CpalClick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalClick")
            .field("device", &self.device_name)
            .finish()
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    samples: Arc<[f32]>,
    cursor: Arc<Mutex<Option<usize>>>,
) -> Result<cpal::Stream, SoundError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = usize::from(config.channels.max(1));
    let err_fn = |err: cpal::StreamError| warn!("audio stream error: {err}");
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let mut cursor = cursor.lock();
            fill_frames(data, channels, &samples, &mut cursor);
        },
        err_fn,
        None,
    )?;
    Ok(stream)
}

/// Copy the next run of click samples into an interleaved output buffer,
/// padding with silence once the click has finished.
fn fill_frames<T>(data: &mut [T], channels: usize, samples: &[f32], cursor: &mut Option<usize>)
where
    T: Sample + FromSample<f32>,
{
    for frame in data.chunks_mut(channels) {
        let value = match *cursor {
            Some(pos) if pos < samples.len() => {
                *cursor = Some(pos + 1);
                samples[pos]
            }
            Some(_) => {
                *cursor = None;
                0.0
            }
            None => 0.0,
        };
        let value = T::from_sample(value);
        for out in frame.iter_mut() {
            *out = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ClickSpec {
        ClickSpec {
            frequency_hz: 2000.0,
            duration_ms: 30,
            volume: 0.5,
        }
    }

    #[test]
    fn test_click_length_matches_duration() {
        assert_eq!(synthesize_click(48_000, spec()).len(), 1440);
        assert_eq!(synthesize_click(44_100, spec()).len(), 1323);
    }

    #[test]
    fn test_click_stays_within_volume_and_decays() {
        let click = synthesize_click(48_000, spec());
        assert!(click.iter().all(|s| s.abs() <= 0.5 + f32::EPSILON));
        let head = click[..100].iter().map(|s| s.abs()).fold(0.0, f32::max);
        let tail = click[click.len() - 100..]
            .iter()
            .map(|s| s.abs())
            .fold(0.0, f32::max);
        assert!(tail < head / 10.0);
    }

    #[test]
    fn test_fill_frames_plays_then_goes_silent() {
        let samples = [0.5f32, -0.5];
        let mut cursor = Some(0);
        let mut out = [1.0f32; 8];
        fill_frames(&mut out, 2, &samples, &mut cursor);
        assert_eq!(out, [0.5, 0.5, -0.5, -0.5, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_fill_frames_idle_is_silent() {
        let mut cursor = None;
        let mut out = [7i16; 4];
        fill_frames(&mut out, 1, &[1.0], &mut cursor);
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn test_volume_is_clamped() {
        let cfg = SoundConfig {
            volume: 3.0,
            ..SoundConfig::default()
        };
        assert_eq!(ClickSpec::from(&cfg).volume, 1.0);
    }

    #[test]
    fn test_silent_and_mock() {
        let mut silent = Silent;
        silent.play();

        let mut mock = MockClickSound::new();
        mock.expect_play().times(1).return_const(());
        mock.play();
    }
}
