use crate::app::App;

/// Callbacks the runtime drives each frame. All hooks default to doing
/// nothing, so a game only implements what it needs.
///
/// `draw` is expected to clear the frame itself (via [`App::clear`]) before
/// issuing draw calls; the runtime presents the frame after it returns.
pub trait Game {
    fn setup(&mut self, _app: &mut App) {}
    fn update(&mut self, _app: &mut App) {}
    fn draw(&mut self, _app: &mut App) {}
}

/// A sprite-like convenience: a named image drawn centered on a point.
pub struct Actor {
    pub image: String,
    pub x: f32,
    pub y: f32,
}

impl Actor {
    pub fn new(image: impl Into<String>, center: (f32, f32)) -> Self {
        Self {
            image: image.into(),
            x: center.0,
            y: center.1,
        }
    }

    pub fn draw(&self, app: &mut App) {
        app.blit_center(&self.image, (self.x, self.y));
    }
}
