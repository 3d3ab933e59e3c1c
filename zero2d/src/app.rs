//! The runtime loop and the game-facing API surface.

use crate::assets::{AssetCache, Image, Sound, SoundLoader, SymphoniaLoader, decode_png};
use crate::audio::AudioEngine;
use crate::clock::FrameClock;
use crate::config::RuntimeDesc;
use crate::error::{Result, Zero2dError};
use crate::game::Game;
use crate::geom::{HAnchor, VAnchor, anchored_top_left};
use crate::input::{InputEvent, Key, quit_requested};
use sdl2::EventPump;
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Owns the window, renderer, asset caches, audio engine and quit flag for
/// one `run`, and exposes the query/draw/play surface games use from their
/// callbacks.
///
/// Everything here lives on the main context; the audio engine's shared
/// state is the only thing touched from elsewhere. Field order is teardown
/// order: the audio device closes before the renderer and window go down.
pub struct App {
    audio: Option<AudioEngine>,
    images: AssetCache<Image>,
    sounds: AssetCache<Sound>,
    sound_loader: SymphoniaLoader,
    keys: HashSet<Scancode>,
    quit: bool,
    width: f32,
    height: f32,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
}

impl App {
    /// Initializes the backend and drives `game` until a quit is requested.
    ///
    /// Window or renderer failure is fatal and reported to the caller
    /// before the loop is ever entered; audio device failure is not (the
    /// game runs silent).
    pub fn run(desc: RuntimeDesc, game: &mut dyn Game) -> Result<()> {
        let mut app = match App::init(&desc) {
            Ok(app) => app,
            Err(e) => {
                log::error!("Initialization failed, not entering the loop: {}", e);
                return Err(e);
            }
        };
        app.main_loop(desc.frame_period, game);
        Ok(())
    }

    fn init(desc: &RuntimeDesc) -> Result<Self> {
        let sdl = sdl2::init().map_err(Zero2dError::Init)?;
        let video = sdl.video().map_err(Zero2dError::Init)?;
        let window = video
            .window(&desc.title, desc.width, desc.height)
            .position_centered()
            .build()
            .map_err(|e| Zero2dError::Init(format!("Failed to create window: {}", e)))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| Zero2dError::Init(format!("Failed to create renderer: {}", e)))?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl.event_pump().map_err(Zero2dError::Init)?;

        let audio = match AudioEngine::start(desc) {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("Audio unavailable, playback requests will be ignored: {}", e);
                None
            }
        };

        Ok(Self {
            audio,
            images: AssetCache::new("images", "png"),
            sounds: AssetCache::new("sounds", "ogg"),
            sound_loader: SymphoniaLoader,
            keys: HashSet::new(),
            quit: false,
            width: desc.width as f32,
            height: desc.height as f32,
            canvas,
            texture_creator,
            event_pump,
        })
    }

    fn main_loop(&mut self, frame_period: Duration, game: &mut dyn Game) {
        game.setup(self);

        let mut clock = FrameClock::new(frame_period, Instant::now());
        while !self.quit {
            self.poll_input();
            if self.pressed(Key::Escape) {
                self.quit = true;
            }
            if self.quit {
                break;
            }

            game.update(self);
            game.draw(self);
            self.canvas.present();

            if let Some(remaining) = clock.tick(Instant::now()) {
                std::thread::sleep(remaining);
            }
        }
    }

    /// Drains pending events and snapshots the keyboard for this iteration.
    fn poll_input(&mut self) {
        if quit_requested(self.event_pump.poll_iter().map(InputEvent::from)) {
            self.quit = true;
        }
        self.keys = self
            .event_pump
            .keyboard_state()
            .pressed_scancodes()
            .collect();
    }

    /// Surface width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether `key` is held down, as of this iteration's input poll.
    pub fn pressed(&self, key: Key) -> bool {
        self.keys.contains(&key.scancode())
    }

    /// Clears the frame to black. Games call this at the top of `draw`.
    pub fn clear(&mut self) {
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();
    }

    /// Returns the cached image for `name`, loading and uploading it on the
    /// first request. `None` means the load failed (already logged).
    pub fn image(&mut self, name: &str) -> Option<Arc<Image>> {
        let texture_creator = &self.texture_creator;
        self.images.get_or_load(name, |path| {
            let decoded = decode_png(path)?;
            Image::from_decoded(decoded, texture_creator)
        })
    }

    /// Draws the named image with its top-left corner at `pos`.
    pub fn blit(&mut self, name: &str, pos: (f32, f32)) {
        self.blit_anchored(name, pos, HAnchor::Left, VAnchor::Top);
    }

    /// Draws the named image centered on `center`.
    pub fn blit_center(&mut self, name: &str, center: (f32, f32)) {
        self.blit_anchored(name, center, HAnchor::Center, VAnchor::Middle);
    }

    /// Draws the named image so that the given anchor point of its rectangle
    /// lands on `pos`. A missing image is a logged no-op.
    pub fn blit_anchored(&mut self, name: &str, pos: (f32, f32), h: HAnchor, v: VAnchor) {
        let Some(image) = self.image(name) else {
            return;
        };
        let (x, y) = anchored_top_left(pos, image.size(), h, v);
        let dst = Rect::new(x as i32, y as i32, image.width(), image.height());
        if let Err(e) = self.canvas.copy(&image.texture, None, dst) {
            log::error!("Failed to draw image '{}': {}", name, e);
        }
    }

    /// Requests playback of the named sound, replacing whatever is playing.
    /// Fire-and-forget: a sound that fails to load, or the absence of an
    /// audio device, makes this a logged no-op.
    pub fn play_sound(&mut self, name: &str) {
        let loader = &self.sound_loader;
        let Some(sound) = self.sounds.get_or_load(name, |path| loader.load(path)) else {
            return;
        };
        match &self.audio {
            Some(engine) => engine.play(sound),
            None => log::debug!("No audio device, ignoring play_sound(\"{}\")", name),
        }
    }

    /// Frames the audio device has pulled since the stream started, as a
    /// diagnostics hook. Zero when no device could be opened.
    pub fn audio_position(&self) -> u64 {
        self.audio
            .as_ref()
            .map(|engine| engine.frames_played())
            .unwrap_or(0)
    }
}
