//! Keyboard keys and input event classification.

use sdl2::event::Event;
use sdl2::keyboard::Scancode;

/// Named keys the game-facing API can query.
///
/// This is the physical-key (scancode) layer, matching "is this key held
/// down right now" polling rather than text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Return,
    Left,
    Right,
    Up,
    Down,
    LShift,
    RShift,
    W,
    A,
    S,
    D,
    Z,
    X,
}

impl Key {
    pub(crate) fn scancode(self) -> Scancode {
        match self {
            Key::Escape => Scancode::Escape,
            Key::Space => Scancode::Space,
            Key::Return => Scancode::Return,
            Key::Left => Scancode::Left,
            Key::Right => Scancode::Right,
            Key::Up => Scancode::Up,
            Key::Down => Scancode::Down,
            Key::LShift => Scancode::LShift,
            Key::RShift => Scancode::RShift,
            Key::W => Scancode::W,
            Key::A => Scancode::A,
            Key::S => Scancode::S,
            Key::D => Scancode::D,
            Key::Z => Scancode::Z,
            Key::X => Scancode::X,
        }
    }
}

/// The runtime only reacts to one kind of window event; everything else is
/// classified as `Other` and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the window.
    Quit,
    Other,
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Quit { .. } => InputEvent::Quit,
            _ => InputEvent::Other,
        }
    }
}

/// Returns true if any event in the drained batch requested a quit.
pub(crate) fn quit_requested<I>(events: I) -> bool
where
    I: IntoIterator<Item = InputEvent>,
{
    events.into_iter().any(|event| event == InputEvent::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_event_maps_to_quit() {
        let event = Event::Quit { timestamp: 0 };
        assert_eq!(InputEvent::from(event), InputEvent::Quit);
    }

    #[test]
    fn test_unrecognized_events_are_dropped() {
        let event = Event::AppTerminating { timestamp: 0 };
        assert_eq!(InputEvent::from(event), InputEvent::Other);
    }

    #[test]
    fn test_quit_requested_finds_close_among_noise() {
        let events = [InputEvent::Other, InputEvent::Quit, InputEvent::Other];
        assert!(quit_requested(events));
        assert!(!quit_requested([InputEvent::Other; 4]));
        assert!(!quit_requested(std::iter::empty::<InputEvent>()));
    }
}
