//! Real-time audio output via cpal.

use crate::assets::Sound;
use crate::audio::playback::PlaybackState;
use crate::config::RuntimeDesc;
use crate::error::{Result, Zero2dError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use std::sync::{Arc, Mutex};

/// Owns the output stream and the mutex-guarded [`PlaybackState`] its data
/// callback drains.
///
/// The callback context pulls samples on the device's own schedule whether
/// or not a sound is active; [`play`](AudioEngine::play) on the main context
/// is the only other path into the shared state, and both sides take the
/// same lock, so a play request and a buffer fill never interleave.
pub struct AudioEngine {
    // Held for its Drop; stopping playback is dropping the stream.
    _stream: cpal::Stream,
    state: Arc<Mutex<PlaybackState>>,
}

impl AudioEngine {
    /// Opens the default output device at the configured rate and channel
    /// count and starts pulling.
    pub fn start(desc: &RuntimeDesc) -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            Zero2dError::AudioDevice("No default output device available".to_string())
        })?;

        let config = cpal::StreamConfig {
            channels: desc.channels,
            sample_rate: cpal::SampleRate(desc.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let default_config = device.default_output_config().map_err(|e| {
            Zero2dError::AudioDevice(format!("Failed to get default config: {}", e))
        })?;

        let state = Arc::new(Mutex::new(PlaybackState::new()));

        let stream = match default_config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, state.clone())?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, state.clone())?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, state.clone())?,
            other => {
                return Err(Zero2dError::AudioFormat(format!(
                    "Unsupported sample format: {:?}",
                    other
                )));
            }
        };

        stream.play().map_err(|e| {
            Zero2dError::AudioDevice(format!("Failed to start stream: {}", e))
        })?;

        Ok(Self {
            _stream: stream,
            state,
        })
    }

    /// Fire-and-forget playback request; replaces whatever is playing.
    pub fn play(&self, sound: Arc<Sound>) {
        match self.state.lock() {
            Ok(mut state) => state.request_play(sound),
            Err(e) => log::error!("Playback state poisoned, dropping play request: {}", e),
        }
    }

    /// Frames pulled by the device since the stream started.
    pub fn frames_played(&self) -> u64 {
        self.state.lock().map(|state| state.cursor()).unwrap_or(0)
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    state: Arc<Mutex<PlaybackState>>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<i16>,
{
    let mut scratch: Vec<i16> = Vec::new();

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0);
                match state.lock() {
                    Ok(mut state) => state.fill(&mut scratch),
                    // A panic on the main side while holding the lock;
                    // degrade to silence instead of propagating.
                    Err(_) => scratch.fill(0),
                }
                for (out, &sample) in data.iter_mut().zip(scratch.iter()) {
                    *out = T::from_sample(sample);
                }
            },
            move |err| {
                log::error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| Zero2dError::AudioDevice(format!("Failed to build stream: {}", e)))?;

    Ok(stream)
}
