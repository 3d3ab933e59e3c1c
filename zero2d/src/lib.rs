//! zero2d is a minimal 2D game runtime: it owns a window, a fixed-cadence
//! game loop, keyboard polling, lazy image/sound caches and a single-voice
//! real-time audio path. Client code implements [`Game`] and hands it to
//! [`run`]; the runtime drives `setup`/`update`/`draw` each frame until the
//! window is closed or escape is held.
//!
//! ```no_run
//! use zero2d::{App, Game};
//!
//! struct Pong;
//!
//! impl Game for Pong {
//!     fn draw(&mut self, app: &mut App) {
//!         app.clear();
//!         app.blit_center("ball", (app.width() / 2.0, app.height() / 2.0));
//!     }
//! }
//!
//! fn main() -> zero2d::Result<()> {
//!     zero2d::run(640, 480, &mut Pong)
//! }
//! ```

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod geom;
pub mod input;

pub use app::App;
pub use assets::{Image, Sound};
pub use config::RuntimeDesc;
pub use error::{Result, Zero2dError};
pub use game::{Actor, Game};
pub use geom::{HAnchor, VAnchor};
pub use input::Key;

/// Opens a `width` × `height` window and blocks driving `game` until quit.
///
/// Window or renderer initialization failure is returned as an error; the
/// loop is never entered in that case.
pub fn run(width: u32, height: u32, game: &mut dyn Game) -> Result<()> {
    let desc = RuntimeDesc {
        width,
        height,
        ..RuntimeDesc::default()
    };
    App::run(desc, game)
}
