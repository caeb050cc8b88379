//! Core simulation module
//!
//! All the game logic, free of any I/O or rendering dependency. Renderer
//! backends only ever read the [`GameState`] handed to them each frame.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, MIN_ARENA_DIMENSION};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use food::{Food, PlacementError};
pub use snake::Snake;
pub use state::{EndReason, GameState, Phase, Position};
