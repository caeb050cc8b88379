use super::direction::Direction;
use super::food::Food;
use super::snake::Snake;

/// A position on the arena grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check membership in a zero-indexed width x height arena
    pub fn is_in_bounds(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.x < width as i32 && self.y >= 0 && self.y < height as i32
    }
}

/// Which screen of the session is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Head left the arena
    WallCollision,
    /// Head overlapped another segment
    SelfCollision,
    /// No free cell left for food: the snake won the board
    ArenaFull,
}

/// Complete session state
///
/// Written only by the engine; the active renderer reads it in a disjoint
/// phase of the same loop iteration. Snake and food are replaced wholesale on
/// restart, never patched field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub width: usize,
    pub height: usize,
    pub score: u32,
    pub phase: Phase,
    pub end: Option<EndReason>,
}

impl GameState {
    pub fn new(snake: Snake, food: Food, width: usize, height: usize) -> Self {
        Self {
            snake,
            food,
            width,
            height,
            score: 0,
            phase: Phase::Menu,
            end: None,
        }
    }

    /// Check if a position is within the arena bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_in_bounds(self.width, self.height)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
