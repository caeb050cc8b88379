use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Smallest playable arena edge
pub const MIN_ARENA_DIMENSION: usize = 16;

/// Invalid session configuration, fatal at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("arena must be at least {MIN_ARENA_DIMENSION}x{MIN_ARENA_DIMENSION}, got {0}x{1}")]
    ArenaTooSmall(usize, usize),
}

/// Configuration for a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the arena grid
    pub width: usize,
    /// Height of the arena grid
    pub height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Fixed simulation step, in milliseconds
    pub tick_millis: u64,
    /// Buffered movement intents before new ones are dropped
    pub input_buffer_capacity: usize,
    /// Most simulation ticks one loop iteration may run while catching up
    /// after a stall
    pub max_catchup_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            initial_snake_length: 4,
            tick_millis: 100,
            input_buffer_capacity: 3,
            max_catchup_ticks: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom arena size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small arena for testing
    pub fn small() -> Self {
        Self::new(MIN_ARENA_DIMENSION, MIN_ARENA_DIMENSION)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_ARENA_DIMENSION || self.height < MIN_ARENA_DIMENSION {
            return Err(ConfigError::ArenaTooSmall(self.width, self.height));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Longest snake the arena can hold before the board is declared won
    pub fn max_snake_length(&self) -> usize {
        self.width * self.height - 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 20);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.tick(), Duration::from_millis(100));
        assert_eq!(config.max_snake_length(), 398);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_too_small_arena_rejected() {
        let config = GameConfig::new(15, 20);
        assert_eq!(config.validate(), Err(ConfigError::ArenaTooSmall(15, 20)));

        let config = GameConfig::new(20, 8);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(30, 24);
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 24);
        assert_eq!(config.max_snake_length(), 718);
    }
}
