//! Shared playback state read by the audio pull callback.

use crate::assets::Sound;
use crate::config::CHANNELS;
use std::sync::Arc;

/// The one piece of state shared between the main context and the audio
/// callback context. Exactly two operations exist: [`request_play`] from the
/// main side and [`fill`] from the callback side, both performed under the
/// engine's mutex so they never interleave mid-update.
///
/// The stream cursor counts frames produced since the device started and
/// never resets; a sound's start position is pinned to the cursor at request
/// time, which makes playback sample-accurate and lets a finished sound
/// decay into silence without any explicit stop signal.
///
/// [`request_play`]: PlaybackState::request_play
/// [`fill`]: PlaybackState::fill
pub struct PlaybackState {
    active: Option<ActiveSound>,
    cursor: u64,
}

struct ActiveSound {
    sound: Arc<Sound>,
    start: u64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            active: None,
            cursor: 0,
        }
    }

    /// Makes `sound` the active sound, starting at the current stream
    /// position. Replaces any sound already playing; the switch takes effect
    /// at the next pulled buffer with no gap or fade.
    pub fn request_play(&mut self, sound: Arc<Sound>) {
        self.active = Some(ActiveSound {
            start: self.cursor,
            sound,
        });
    }

    /// Fills `buffer` (interleaved stereo) with the active sound where the
    /// stream position overlaps it and silence everywhere else, then
    /// advances the stream cursor by the number of frames written.
    pub fn fill(&mut self, buffer: &mut [i16]) {
        let frames = buffer.len() / CHANNELS;
        buffer.fill(0);
        if let Some(active) = &self.active {
            let samples = active.sound.samples();
            for i in 0..frames {
                let position = self.cursor + i as u64;
                let offset = (position - active.start) as usize;
                if offset < active.sound.frames() {
                    let src = &samples[offset * CHANNELS..(offset + 1) * CHANNELS];
                    buffer[i * CHANNELS..(i + 1) * CHANNELS].copy_from_slice(src);
                }
            }
        }
        self.cursor += frames as u64;
    }

    /// Frames produced since the device started.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stereo sound whose frame at index `i` holds `(base + i)` in both
    /// channels, so pulled output identifies its source.
    fn marked_sound(base: i16, frames: usize) -> Arc<Sound> {
        let samples = (0..frames as i16)
            .flat_map(|i| [base + i, base + i])
            .collect();
        Arc::new(Sound::new(samples))
    }

    fn pull_frames(state: &mut PlaybackState, frames: usize) -> Vec<i16> {
        let mut buffer = vec![0i16; frames * CHANNELS];
        state.fill(&mut buffer);
        buffer
    }

    #[test]
    fn test_silence_when_nothing_active() {
        let mut state = PlaybackState::new();
        let buffer = pull_frames(&mut state, 64);
        assert!(buffer.iter().all(|&s| s == 0));
        assert_eq!(state.cursor(), 64);
    }

    #[test]
    fn test_cursor_advances_by_frames_regardless_of_activity() {
        let mut state = PlaybackState::new();
        pull_frames(&mut state, 100);
        state.request_play(marked_sound(1, 10));
        pull_frames(&mut state, 50);
        assert_eq!(state.cursor(), 150);
    }

    #[test]
    fn test_playback_is_sample_accurate() {
        let mut state = PlaybackState::new();
        state.request_play(marked_sound(100, 4));
        let buffer = pull_frames(&mut state, 6);
        assert_eq!(buffer, vec![100, 100, 101, 101, 102, 102, 103, 103, 0, 0, 0, 0]);
    }

    #[test]
    fn test_silence_after_end() {
        let mut state = PlaybackState::new();
        pull_frames(&mut state, 30);
        state.request_play(marked_sound(1, 20));
        pull_frames(&mut state, 20);
        // Everything at absolute position >= start + length is zero.
        let buffer = pull_frames(&mut state, 40);
        assert!(buffer.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_new_sound_replaces_current_one_mid_playback() {
        let mut state = PlaybackState::new();

        // Sound A: 1000 frames starting at stream position 0.
        state.request_play(marked_sound(1000, 1000));
        let head = pull_frames(&mut state, 200);
        assert_eq!(head[0], 1000);
        assert_eq!(head[199 * CHANNELS], 1199);

        // Sound B: 500 frames, requested at position 200. A still had 800
        // frames left; they are discarded, not resumed later.
        state.request_play(marked_sound(5000, 500));
        let mid = pull_frames(&mut state, 500);
        assert_eq!(mid[0], 5000);
        assert_eq!(mid[499 * CHANNELS], 5499);

        let tail = pull_frames(&mut state, 300);
        assert!(tail.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_sound_spanning_multiple_pulls_stays_contiguous() {
        let mut state = PlaybackState::new();
        state.request_play(marked_sound(0, 96));
        let first = pull_frames(&mut state, 32);
        let second = pull_frames(&mut state, 32);
        assert_eq!(first[31 * CHANNELS], 31);
        assert_eq!(second[0], 32);
    }
}
