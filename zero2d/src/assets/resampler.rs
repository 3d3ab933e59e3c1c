use crate::config::CHANNELS;
use crate::error::{Result, Zero2dError};
use rubato::{FftFixedIn, Resampler};

const CHUNK_SIZE: usize = 1024;

/// Offline resampler that brings a decoded sound to the device sample rate.
///
/// Works on the interleaved stereo i16 stream the sound loader produces:
/// channels are split out, resampled independently in fixed-size chunks,
/// and re-interleaved. The final chunk is zero-padded, so the output may
/// carry a short silent tail.
pub struct AudioResampler {
    source_sample_rate: u32,
    target_sample_rate: u32,
}

impl AudioResampler {
    pub fn new(source_sample_rate: u32, target_sample_rate: u32) -> Result<Self> {
        if source_sample_rate == 0 || target_sample_rate == 0 {
            return Err(Zero2dError::AudioFormat(
                "Sample rates must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            source_sample_rate,
            target_sample_rate,
        })
    }

    /// Resamples an interleaved stereo stream to the target rate. Returns
    /// the input unchanged when the rates already match.
    pub fn resample_interleaved(&self, samples: &[i16]) -> Result<Vec<i16>> {
        if self.source_sample_rate == self.target_sample_rate {
            return Ok(samples.to_vec());
        }

        let mut resampled = Vec::with_capacity(CHANNELS);
        for ch in 0..CHANNELS {
            let channel: Vec<f32> = samples
                .chunks_exact(CHANNELS)
                .map(|frame| frame[ch] as f32 / i16::MAX as f32)
                .collect();
            resampled.push(self.resample_channel(&channel)?);
        }

        let frames = resampled.iter().map(Vec::len).min().unwrap_or(0);
        let mut out = Vec::with_capacity(frames * CHANNELS);
        for i in 0..frames {
            for channel in &resampled {
                let sample = (channel[i] * i16::MAX as f32)
                    .round()
                    .clamp(i16::MIN as f32, i16::MAX as f32);
                out.push(sample as i16);
            }
        }
        Ok(out)
    }

    fn resample_channel(&self, channel: &[f32]) -> Result<Vec<f32>> {
        let mut resampler = FftFixedIn::new(
            self.source_sample_rate as usize,
            self.target_sample_rate as usize,
            CHUNK_SIZE,
            2, // sub_chunks
            1, // one channel at a time
        )
        .map_err(|e| Zero2dError::AudioLoading(format!("Failed to create resampler: {}", e)))?;

        let mut output = Vec::new();
        let mut index = 0;
        while index < channel.len() {
            let available = (channel.len() - index).min(CHUNK_SIZE);
            let mut chunk = vec![0.0f32; CHUNK_SIZE];
            chunk[..available].copy_from_slice(&channel[index..index + available]);

            let waves = resampler
                .process(&[chunk], None)
                .map_err(|e| Zero2dError::AudioLoading(format!("Resampling error: {}", e)))?;
            if let Some(first) = waves.first() {
                output.extend_from_slice(first);
            }

            index += available;
        }
        Ok(output)
    }

    pub fn ratio(&self) -> f64 {
        self.target_sample_rate as f64 / self.source_sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_rates_pass_through() {
        let resampler = AudioResampler::new(44_100, 44_100).unwrap();
        let samples = vec![100, -100, 200, -200];
        assert_eq!(resampler.resample_interleaved(&samples).unwrap(), samples);
    }

    #[test]
    fn test_invalid_sample_rates() {
        assert!(AudioResampler::new(0, 44_100).is_err());
        assert!(AudioResampler::new(22_050, 0).is_err());
    }

    #[test]
    fn test_upsampling_roughly_doubles_the_frame_count() {
        let resampler = AudioResampler::new(22_050, 44_100).unwrap();
        assert_eq!(resampler.ratio(), 2.0);

        // 2000 source frames of stereo silence-with-a-pulse.
        let mut samples = vec![0i16; 2000 * CHANNELS];
        samples[0] = 1000;
        samples[1] = 1000;

        let out = resampler.resample_interleaved(&samples).unwrap();
        let out_frames = out.len() / CHANNELS;
        // Chunked processing pads the tail, so allow up to one chunk over.
        assert!(out_frames >= 4000);
        assert!(out_frames <= 4000 + 2 * CHUNK_SIZE);
    }
}
