//! Bouncing-sprite demo for zero2d.
//!
//! Expects `images/ball.png` and `sounds/eep.ogg` relative to the working
//! directory; missing assets are logged and skipped, so the window still
//! opens without them.

use zero2d::{Actor, App, Game, Key};

struct Ball {
    actor: Actor,
    vx: f32,
    vy: f32,
}

impl Ball {
    fn update(&mut self, app: &App) {
        self.actor.x += self.vx;
        self.actor.y += self.vy;
        if self.actor.x < 0.0 || self.actor.x > app.width() {
            self.vx = -self.vx;
        }
        if self.actor.y < 0.0 || self.actor.y > app.height() {
            self.vy = -self.vy;
        }
    }
}

#[derive(Default)]
struct Demo {
    balls: Vec<Ball>,
    space_was_down: bool,
}

impl Game for Demo {
    fn setup(&mut self, app: &mut App) {
        let center = (app.width() / 2.0, app.height() / 2.0);
        for i in 0..10 {
            let angle = i as f32 * std::f32::consts::TAU / 10.0;
            self.balls.push(Ball {
                actor: Actor::new("ball", center),
                vx: 2.5 * angle.cos(),
                vy: 2.5 * angle.sin(),
            });
        }
    }

    fn update(&mut self, app: &mut App) {
        if app.pressed(Key::Left) {
            log::info!("left pressed");
        } else if app.pressed(Key::Right) {
            log::info!("right pressed");
        }

        let space_down = app.pressed(Key::Space);
        if space_down && !self.space_was_down {
            app.play_sound("eep");
            log::debug!("eep requested at stream position {}", app.audio_position());
        }
        self.space_was_down = space_down;

        for ball in &mut self.balls {
            ball.update(app);
        }
    }

    fn draw(&mut self, app: &mut App) {
        app.clear();
        for ball in &self.balls {
            ball.actor.draw(app);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut game = Demo::default();
    zero2d::run(640, 480, &mut game)?;
    Ok(())
}
