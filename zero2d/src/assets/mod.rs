//! Lazy, name-keyed caches for decoded images and sounds.
//!
//! Asset names map to file paths by convention: image `N` lives at
//! `images/N.png`, sound `N` at `sounds/N.ogg`. Each distinct name is
//! decoded and uploaded at most once per run; load failures are logged and
//! *not* cached, so a later request retries (e.g. after the file appears).

mod image_loader;
mod resampler;
mod sound_loader;

pub use image_loader::{DecodedImage, decode_png};
pub use resampler::AudioResampler;
pub use sound_loader::{SoundLoader, SymphoniaLoader};

use crate::config::CHANNELS;
use crate::error::{Result, Zero2dError};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{BlendMode, Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded image uploaded to the renderer. Immutable after creation; the
/// texture is released with the SDL context when the runtime tears down.
pub struct Image {
    width: u32,
    height: u32,
    pub(crate) texture: Texture,
}

impl Image {
    /// Uploads decoded RGBA8 pixels as a static texture.
    pub(crate) fn from_decoded(
        decoded: DecodedImage,
        texture_creator: &TextureCreator<WindowContext>,
    ) -> Result<Self> {
        let mut texture = texture_creator
            .create_texture_static(PixelFormatEnum::ABGR8888, decoded.width, decoded.height)
            .map_err(|e| Zero2dError::ImageLoading(format!("Failed to create texture: {}", e)))?;
        texture
            .update(None, &decoded.rgba, decoded.width as usize * 4)
            .map_err(|e| Zero2dError::ImageLoading(format!("Failed to upload pixels: {}", e)))?;
        texture.set_blend_mode(BlendMode::Blend);
        Ok(Self {
            width: decoded.width,
            height: decoded.height,
            texture,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// A decoded sound: interleaved stereo 16-bit PCM at the device sample rate.
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    samples: Vec<i16>,
}

impl Sound {
    pub fn new(samples: Vec<i16>) -> Self {
        debug_assert!(samples.len() % CHANNELS == 0);
        Self { samples }
    }

    /// Interleaved samples, `frames() * CHANNELS` long.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of sample frames (one frame = one sample per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / CHANNELS
    }
}

/// Name → `Arc<T>` map populated lazily, once per distinct name for the
/// lifetime of the run. No eviction. Only ever touched from the main
/// update/draw context, so no internal synchronization.
pub struct AssetCache<T> {
    root: PathBuf,
    extension: &'static str,
    entries: HashMap<String, Arc<T>>,
}

impl<T> AssetCache<T> {
    pub fn new(root: impl Into<PathBuf>, extension: &'static str) -> Self {
        Self {
            root: root.into(),
            extension,
            entries: HashMap::new(),
        }
    }

    /// Resolves an asset name to its conventional file path.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, self.extension))
    }

    /// Returns the cached entry for `name`, or invokes `load` on its
    /// conventional path and caches the result.
    ///
    /// A failed load is logged with the asset name and cause and returns
    /// `None` without poisoning the cache; the next request for the same
    /// name loads again.
    pub fn get_or_load<F>(&mut self, name: &str, load: F) -> Option<Arc<T>>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        if let Some(entry) = self.entries.get(name) {
            return Some(entry.clone());
        }
        let path = self.path_for(name);
        match load(&path) {
            Ok(asset) => {
                let asset = Arc::new(asset);
                self.entries.insert(name.to_string(), asset.clone());
                Some(asset)
            }
            Err(e) => {
                log::warn!("Failed to load asset '{}' from {}: {}", name, path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cache_loads_once_per_name() {
        let mut cache: AssetCache<u32> = AssetCache::new("images", "png");
        let loads = Cell::new(0u32);
        let load = |_: &Path| {
            loads.set(loads.get() + 1);
            Ok(7u32)
        };

        let first = cache.get_or_load("alien", load).unwrap();
        let second = cache.get_or_load("alien", load).unwrap();

        assert_eq!(loads.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_names_load_separately() {
        let mut cache: AssetCache<u32> = AssetCache::new("images", "png");
        let loads = Cell::new(0u32);
        let load = |_: &Path| {
            loads.set(loads.get() + 1);
            Ok(0u32)
        };

        cache.get_or_load("alien", load).unwrap();
        cache.get_or_load("ship", load).unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_failed_load_is_not_cached_and_retries() {
        let mut cache: AssetCache<u32> = AssetCache::new("sounds", "ogg");
        let attempts = Cell::new(0u32);
        let load = |_: &Path| {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 3 {
                Err(Zero2dError::AudioLoading("file missing".to_string()))
            } else {
                Ok(42u32)
            }
        };

        assert!(cache.get_or_load("eep", load).is_none());
        assert!(cache.get_or_load("eep", load).is_none());
        let loaded = cache.get_or_load("eep", load).unwrap();
        assert_eq!(*loaded, 42);
        assert_eq!(attempts.get(), 3);

        // Now cached: the loader must not run again.
        cache.get_or_load("eep", load).unwrap();
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn test_path_convention() {
        let cache: AssetCache<u32> = AssetCache::new("images", "png");
        assert_eq!(cache.path_for("alien"), PathBuf::from("images/alien.png"));
    }

    #[test]
    fn test_sound_frame_count() {
        let sound = Sound::new(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(sound.frames(), 3);
    }
}
