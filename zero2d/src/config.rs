use std::time::Duration;

/// Sample rate negotiated with the output device, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Number of interleaved output channels (stereo).
pub const CHANNELS: usize = 2;

/// Nominal frame budget for the runtime loop (~60 Hz).
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Configuration descriptor for one `run` of the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeDesc {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Target duration of one loop iteration
    pub frame_period: Duration,
    /// Sample rate requested from the audio device
    pub sample_rate: u32,
    /// Channel count requested from the audio device (2 = stereo)
    pub channels: u16,
}

impl Default for RuntimeDesc {
    fn default() -> Self {
        Self {
            title: "zero2d".to_string(),
            width: 640,
            height: 480,
            frame_period: FRAME_PERIOD,
            sample_rate: SAMPLE_RATE,
            channels: CHANNELS as u16,
        }
    }
}
