use crate::assets::{AudioResampler, Sound};
use crate::config::SAMPLE_RATE;
use crate::error::{Result, Zero2dError};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

/// Seam between the sound cache and the audio decoder, so tests can swap in
/// a fake loader.
pub trait SoundLoader {
    fn load(&self, path: &Path) -> Result<Sound>;
}

/// Default sound loader backed by the Symphonia decoder library.
///
/// Handles the compressed formats Symphonia enables by default (ogg/vorbis,
/// flac, wav, ...) and decodes them to interleaved stereo i16 PCM at the
/// device sample rate, resampling when the source rate differs.
pub struct SymphoniaLoader;

impl SoundLoader for SymphoniaLoader {
    fn load(&self, path: &Path) -> Result<Sound> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| {
                Zero2dError::AudioLoading(format!("Failed to probe audio format: {:?}", e))
            })?;
        let mut format = probed.format;

        let track = format.default_track().ok_or_else(|| {
            Zero2dError::AudioLoading("No default audio track found".to_string())
        })?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| Zero2dError::AudioLoading("Sample rate not found".to_string()))?;
        let channels = track
            .codec_params
            .channels
            .ok_or_else(|| Zero2dError::AudioLoading("Channel count not found".to_string()))?
            .count();
        if channels == 0 {
            return Err(Zero2dError::AudioFormat("Track has no channels".to_string()));
        }

        let mut decoder = get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| {
                Zero2dError::AudioLoading(format!("Failed to create decoder: {:?}", e))
            })?;

        let mut samples: Vec<i16> = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(_)) => break, // end-of-file
                Err(e) => {
                    return Err(Zero2dError::AudioLoading(format!(
                        "Error reading packet: {:?}",
                        e
                    )));
                }
            };

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::IoError(_)) => break,
                Err(SymphoniaError::DecodeError(_)) => continue, // recoverable corruption
                Err(e) => {
                    return Err(Zero2dError::AudioLoading(format!(
                        "Error decoding packet: {:?}",
                        e
                    )));
                }
            };

            let spec = *decoded.spec();
            let mut tmp = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
            tmp.copy_interleaved_ref(decoded);
            samples.extend_from_slice(tmp.samples());
        }

        let samples = normalize_to_stereo(samples, channels);
        let samples = if sample_rate != SAMPLE_RATE {
            log::debug!(
                "{}: resampling {} Hz -> {} Hz",
                path.display(),
                sample_rate,
                SAMPLE_RATE
            );
            AudioResampler::new(sample_rate, SAMPLE_RATE)?.resample_interleaved(&samples)?
        } else {
            samples
        };

        Ok(Sound::new(samples))
    }
}

/// Rewrites an interleaved sample stream to two channels: mono is duplicated
/// into both ears, anything wider keeps its first two channels.
fn normalize_to_stereo(samples: Vec<i16>, channels: usize) -> Vec<i16> {
    match channels {
        2 => samples,
        1 => samples.iter().flat_map(|&s| [s, s]).collect(),
        n => samples
            .chunks_exact(n)
            .flat_map(|frame| [frame[0], frame[1]])
            .collect(),
    }
}
