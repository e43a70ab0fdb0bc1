//! Keyboard and touch input
//!
//! Host event callbacks write into [`Input`]; the frame driver reads a
//! [`FrameInput`] snapshot once per frame and calls [`Input::end_frame`]
//! afterwards so the next snapshot can tell presses from holds.

use bitflags::bitflags;

bitflags! {
    /// Keys the game reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const ENTER = 1 << 4;
        const SPACE = 1 << 5;
    }
}

impl Keys {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Keys> {
        match name {
            "ArrowUp" | "Up" => Some(Keys::UP),
            "ArrowDown" | "Down" => Some(Keys::DOWN),
            "ArrowLeft" | "Left" => Some(Keys::LEFT),
            "ArrowRight" | "Right" => Some(Keys::RIGHT),
            "Enter" => Some(Keys::ENTER),
            " " | "Spacebar" => Some(Keys::SPACE),
            _ => None,
        }
    }

    /// Keys that confirm on the title and end screens
    pub const CONFIRM: Keys = Keys::ENTER.union(Keys::SPACE);
}

/// Input state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Keys currently down
    pub held: Keys,
    /// Keys that went down since the previous frame
    pub pressed: Keys,
    /// A touch has been seen at some point; touch controls replace left/right
    pub touch_active: bool,
    /// A finger is on the screen
    pub touch_down: bool,
    /// A touch started since the previous frame
    pub touch_started: bool,
}

impl FrameInput {
    /// Enter/Space press edge or a new touch
    pub fn confirm(&self) -> bool {
        self.pressed.intersects(Keys::CONFIRM) || self.touch_started
    }

    pub fn up(&self) -> bool {
        self.held.contains(Keys::UP)
    }

    pub fn down(&self) -> bool {
        self.held.contains(Keys::DOWN)
    }

    /// Brake: left key, or finger lifted on touch devices
    pub fn brake(&self) -> bool {
        if self.touch_active {
            !self.touch_down
        } else {
            self.held.contains(Keys::LEFT)
        }
    }

    /// Throttle: right key, or finger down on touch devices
    pub fn throttle(&self) -> bool {
        if self.touch_active {
            self.touch_down
        } else {
            self.held.contains(Keys::RIGHT)
        }
    }
}

/// Buffered host input
#[derive(Debug, Clone, Default)]
pub struct Input {
    down: Keys,
    previous: Keys,
    touch_active: bool,
    touch_down: bool,
    touch_started: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for keys the game ignores, so the host can let them through
    pub fn key_down(&mut self, name: &str) -> bool {
        match Keys::from_key_name(name) {
            Some(key) => {
                self.down.insert(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Keys::from_key_name(name) {
            Some(key) => {
                self.down.remove(key);
                true
            }
            None => false,
        }
    }

    pub fn touch_start(&mut self) {
        self.touch_active = true;
        self.touch_down = true;
        self.touch_started = true;
    }

    pub fn touch_end(&mut self) {
        self.touch_down = false;
    }

    pub fn touch_cancel(&mut self) {
        self.touch_end();
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.down = Keys::empty();
        self.touch_down = false;
    }

    /// Current state diffed against the previous frame
    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            held: self.down,
            pressed: self.down.difference(self.previous),
            touch_active: self.touch_active,
            touch_down: self.touch_down,
            touch_started: self.touch_started,
        }
    }

    /// Remember this frame's keys and clear one-shot flags
    pub fn end_frame(&mut self) {
        self.previous = self.down;
        self.touch_started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_hold_is_not() {
        let mut input = Input::new();
        assert!(input.key_down("Enter"));

        let frame = input.snapshot();
        assert!(frame.pressed.contains(Keys::ENTER));
        assert!(frame.confirm());
        input.end_frame();

        let frame = input.snapshot();
        assert!(frame.held.contains(Keys::ENTER));
        assert!(frame.pressed.is_empty());
        assert!(!frame.confirm());
    }

    #[test]
    fn test_release_and_repress() {
        let mut input = Input::new();
        input.key_down(" ");
        input.end_frame();
        input.key_up(" ");
        input.end_frame();
        input.key_down(" ");
        assert!(input.snapshot().confirm());
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut input = Input::new();
        assert!(!input.key_down("q"));
        assert!(input.snapshot().held.is_empty());
    }

    #[test]
    fn test_touch_start_is_one_shot() {
        let mut input = Input::new();
        input.touch_start();
        let frame = input.snapshot();
        assert!(frame.confirm());
        assert!(frame.throttle());
        assert!(!frame.brake());
        input.end_frame();

        let frame = input.snapshot();
        assert!(!frame.confirm());
        assert!(frame.touch_down);
    }

    #[test]
    fn test_touch_lifted_brakes() {
        let mut input = Input::new();
        input.touch_start();
        input.end_frame();
        input.touch_end();
        let frame = input.snapshot();
        assert!(frame.brake());
        assert!(!frame.throttle());
    }

    #[test]
    fn test_keyboard_left_right_without_touch() {
        let mut input = Input::new();
        input.key_down("ArrowRight");
        let frame = input.snapshot();
        assert!(frame.throttle());
        assert!(!frame.brake());

        input.key_up("ArrowRight");
        input.key_down("ArrowLeft");
        let frame = input.snapshot();
        assert!(frame.brake());
    }

    #[test]
    fn test_release_all() {
        let mut input = Input::new();
        input.key_down("ArrowUp");
        input.touch_start();
        input.release_all();
        let frame = input.snapshot();
        assert!(frame.held.is_empty());
        assert!(!frame.touch_down);
    }
}
