//! Single-voice audio playback: shared mixer state plus the device stream
//! that drains it.

mod engine;
mod playback;

pub use engine::AudioEngine;
pub use playback::PlaybackState;
