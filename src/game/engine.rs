use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    snake::Snake,
    state::{EndReason, GameState, Phase, Position},
};

/// What happened during one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Terminal condition reached this tick, if any
    pub ended: Option<EndReason>,
}

impl TickOutcome {
    const NONE: TickOutcome = TickOutcome {
        ate_food: false,
        ended: None,
    };
}

/// The simulation engine: advances the world one fixed tick at a time and
/// drives the session phase transitions.
///
/// Movement and collision are fully deterministic given the sequence of
/// buffered intents; food placement is the only randomized element and draws
/// from the engine's own seedable source.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with deterministic food placement, for tests
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session: snake spawned at the arena center facing left,
    /// food at a random free cell, phase at the menu.
    pub fn reset(&mut self) -> GameState {
        let center = Position::new(
            (self.config.width / 2) as i32,
            (self.config.height / 2) as i32,
        );
        let snake = Snake::new(
            center,
            Direction::Left,
            self.config.initial_snake_length,
            self.config.max_snake_length(),
        );
        let food = Food::spawn(&mut self.rng, &snake, self.config.width, self.config.height)
            .expect("a fresh arena always has a free cell");

        GameState::new(snake, food, self.config.width, self.config.height)
    }

    /// Menu -> Playing. The caller resets its tick accumulator alongside.
    pub fn begin_round(&self, state: &mut GameState) {
        if state.phase == Phase::Menu {
            state.phase = Phase::Playing;
        }
    }

    /// Playing <-> Paused. The world does not advance while paused.
    pub fn toggle_pause(&self, state: &mut GameState) {
        state.phase = match state.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    /// Run exactly one tick of game logic. Order is fixed: apply one buffered
    /// intent, advance, judge the new head against the pre-growth segment
    /// list, then handle food. No-op outside the Playing phase.
    pub fn tick(&mut self, state: &mut GameState, intent: Option<Direction>) -> TickOutcome {
        if state.phase != Phase::Playing {
            return TickOutcome::NONE;
        }

        if let Some(direction) = intent {
            state.snake.change_direction(direction);
        }

        state.snake.advance();
        let head = state.snake.head();

        if let Some(reason) = self.check_collision(state, head) {
            return self.end_round(state, reason, false);
        }

        if head != state.food.position() {
            return TickOutcome::NONE;
        }

        // The score counts the winning bite too
        let grew = state.snake.grow();
        state.score += 1;

        let relocated = grew
            && state
                .food
                .relocate(&mut self.rng, &state.snake, state.width, state.height);

        if !relocated {
            return self.end_round(state, EndReason::ArenaFull, true);
        }

        TickOutcome {
            ate_food: true,
            ended: None,
        }
    }

    /// Collision predicate: out of bounds on either axis, or overlapping any
    /// segment other than the head itself
    fn check_collision(&self, state: &GameState, head: Position) -> Option<EndReason> {
        if !state.is_in_bounds(head) {
            return Some(EndReason::WallCollision);
        }
        if state.snake.collides_with_body(head) {
            return Some(EndReason::SelfCollision);
        }
        None
    }

    fn end_round(&self, state: &mut GameState, reason: EndReason, ate_food: bool) -> TickOutcome {
        state.phase = Phase::GameOver;
        state.end = Some(reason);
        TickOutcome {
            ate_food,
            ended: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_engine() -> (GameEngine, GameState) {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 7);
        let mut state = engine.reset();
        engine.begin_round(&mut state);
        (engine, state)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 7);
        let state = engine.reset();

        assert_eq!(state.phase, Phase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.snake.direction(), Direction::Left);
        assert!(!state.is_occupied_by_snake(state.food.position()));
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 7);
        let mut state = engine.reset();
        let before = state.clone();

        let outcome = engine.tick(&mut state, Some(Direction::Up));

        assert_eq!(outcome, TickOutcome::NONE);
        assert_eq!(state, before);
    }

    #[test]
    fn test_four_ticks_left_from_center() {
        // 20x20 arena, snake length 4 facing left with head at (10,10);
        // four ticks later the head sits at (6,10) with length unchanged.
        let (mut engine, mut state) = playing_engine();
        // Keep food out of the path
        state.food = Food::place(Position::new(0, 0), &state.snake, 20, 20).unwrap();

        for _ in 0..4 {
            engine.tick(&mut state, None);
        }

        assert_eq!(state.snake.head(), Position::new(6, 10));
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_eating_grows_scores_and_relocates() {
        let (mut engine, mut state) = playing_engine();
        let next_head = state.snake.head().moved_in_direction(state.snake.direction());
        state.food = Food::place(next_head, &state.snake, 20, 20).unwrap();

        let outcome = engine.tick(&mut state, None);

        assert!(outcome.ate_food);
        assert!(outcome.ended.is_none());
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.score, 1);
        assert!(!state.is_occupied_by_snake(state.food.position()));
    }

    #[test]
    fn test_wall_collision_freezes_score() {
        let (mut engine, mut state) = playing_engine();
        state.score = 3;
        state.snake = Snake::new(Position::new(0, 5), Direction::Left, 4, 398);
        state.food = Food::place(Position::new(12, 12), &state.snake, 20, 20).unwrap();

        let outcome = engine.tick(&mut state, None);

        assert_eq!(outcome.ended, Some(EndReason::WallCollision));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.snake.head(), Position::new(-1, 5));
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_self_collision() {
        let (mut engine, mut state) = playing_engine();
        // Snake at (5,5) going Right with length 5, then a tight box turn:
        // after Right, Down, Left the head faces the body at (5,5).
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 5, 398);
        state.food = Food::place(Position::new(12, 12), &state.snake, 20, 20).unwrap();

        engine.tick(&mut state, None);
        engine.tick(&mut state, Some(Direction::Down));
        engine.tick(&mut state, Some(Direction::Left));
        let outcome = engine.tick(&mut state, Some(Direction::Up));

        assert_eq!(outcome.ended, Some(EndReason::SelfCollision));
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_tail_chase_is_not_a_collision() {
        // Moving into the cell the tail vacates this very tick is legal
        let (mut engine, mut state) = playing_engine();
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 4, 398);
        state.food = Food::place(Position::new(12, 12), &state.snake, 20, 20).unwrap();

        // Loop the head around a 2x2 block back onto the old tail cell
        engine.tick(&mut state, Some(Direction::Down));
        engine.tick(&mut state, Some(Direction::Left));
        let outcome = engine.tick(&mut state, Some(Direction::Up));

        assert!(outcome.ended.is_none());
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_grow_at_capacity_ends_round_as_win() {
        let (mut engine, mut state) = playing_engine();
        // A snake already at its maximum length, about to eat
        state.snake = Snake::new(Position::new(10, 10), Direction::Left, 4, 4);
        state.food = Food::place(Position::new(9, 10), &state.snake, 20, 20).unwrap();
        state.score = 9;

        let outcome = engine.tick(&mut state, None);

        assert_eq!(outcome.ended, Some(EndReason::ArenaFull));
        assert!(outcome.ate_food);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_reverse_intent_ignored_mid_round() {
        let (mut engine, mut state) = playing_engine();
        state.food = Food::place(Position::new(0, 0), &state.snake, 20, 20).unwrap();
        let head = state.snake.head();

        engine.tick(&mut state, Some(Direction::Right));

        assert_eq!(state.snake.direction(), Direction::Left);
        assert_eq!(state.snake.head(), head.moved_in_direction(Direction::Left));
    }

    #[test]
    fn test_pause_round_trip() {
        let (engine, mut state) = playing_engine();

        engine.toggle_pause(&mut state);
        assert_eq!(state.phase, Phase::Paused);
        engine.toggle_pause(&mut state);
        assert_eq!(state.phase, Phase::Playing);

        state.phase = Phase::Menu;
        engine.toggle_pause(&mut state);
        assert_eq!(state.phase, Phase::Menu);
    }
}
