//! The renderer contract every backend plugin implements
//!
//! The core only ever talks to a backend through [`Renderer`] plus the two
//! C-linkage exports declared in [`plugin`]. All game data stays on the core
//! side; backends are pure presentation and may be swapped mid-session.

pub mod plugin;

use crate::game::{Direction, GameState};

/// One polled input event, as reported by the active backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    None,
    Up,
    Down,
    Left,
    Right,
    Quit,
    Pause,
    Enter,
    SwitchBackend1,
    SwitchBackend2,
    SwitchBackend3,
}

impl Input {
    /// The movement intent carried by this input, if any. Only these are
    /// ever buffered; everything else acts immediately.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Input::Up => Some(Direction::Up),
            Input::Down => Some(Direction::Down),
            Input::Left => Some(Direction::Left),
            Input::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// The zero-based backend slot requested by a switch command, if any
    pub fn switch_slot(self) -> Option<usize> {
        match self {
            Input::SwitchBackend1 => Some(0),
            Input::SwitchBackend2 => Some(1),
            Input::SwitchBackend3 => Some(2),
            _ => None,
        }
    }
}

/// Interchangeable presentation backend
///
/// Every method is non-blocking by contract; a backend that cannot draw must
/// fail silently rather than stall the loop, and no panic may escape these
/// methods across the module boundary.
pub trait Renderer {
    /// One-time setup sized to the arena
    fn init(&mut self, width: usize, height: usize);

    /// Draw one frame of the Playing phase. Paused reuses this with a zero
    /// delta.
    fn render(&mut self, state: &GameState, delta: f32);

    /// Draw the menu screen
    fn render_menu(&mut self, state: &GameState, delta: f32);

    /// Draw the game-over screen
    fn render_game_over(&mut self, state: &GameState, delta: f32);

    /// Return one pending input event without blocking
    fn poll_input(&mut self) -> Input;
}
