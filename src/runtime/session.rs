use std::time::Duration;

use crate::game::{GameConfig, GameEngine, GameState, Phase};
use crate::input::InputBuffer;
use crate::metrics::SessionMetrics;
use crate::render::{Input, Renderer};

use super::clock::TickClock;

/// What the main loop should do after one polled input was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Terminate the loop
    Quit,
    /// Hot-swap to the backend in this slot
    SwitchBackend(usize),
}

/// One play session: the world, its engine, the intent buffer and the tick
/// clock, driven by the main loop one polled input and one time delta at a
/// time.
///
/// Backend concerns never reach this type; a hot-swap is reported upward as
/// [`Control::SwitchBackend`] and touches nothing here, which is what makes
/// swapping safe without serializing any state.
pub struct Session {
    engine: GameEngine,
    state: GameState,
    buffer: InputBuffer,
    clock: TickClock,
    metrics: SessionMetrics,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::build(GameEngine::new(config))
    }

    /// Deterministic food placement, for tests
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::build(GameEngine::with_seed(config, seed))
    }

    fn build(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let config = engine.config();
        let buffer = InputBuffer::new(config.input_buffer_capacity);
        let clock = TickClock::new(config.tick(), config.max_catchup_ticks);
        Self {
            engine,
            state,
            buffer,
            clock,
            metrics: SessionMetrics::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Route one polled input. Movement intents are buffered for the tick
    /// to consume; immediate commands act right here; quit and backend
    /// switches are handed back to the loop.
    pub fn handle_input(&mut self, input: Input) -> Control {
        if let Some(direction) = input.direction() {
            self.buffer.push(direction);
            return Control::Continue;
        }
        if let Some(slot) = input.switch_slot() {
            return Control::SwitchBackend(slot);
        }

        match input {
            Input::Quit => return Control::Quit,
            Input::Pause => self.engine.toggle_pause(&mut self.state),
            Input::Enter => self.handle_enter(),
            _ => {}
        }
        Control::Continue
    }

    fn handle_enter(&mut self) {
        match self.state.phase {
            Phase::Menu => {
                // Accumulated menu time must not burst into ticks
                self.clock.reset();
                self.engine.begin_round(&mut self.state);
            }
            Phase::GameOver => {
                // Full reset: score back to zero, snake and food replaced
                // wholesale, stale intents discarded
                self.state = self.engine.reset();
                self.buffer.clear();
            }
            _ => {}
        }
    }

    /// Account elapsed wall-clock time and run however many fixed ticks it
    /// covers. Each tick consumes at most one buffered intent. Outside the
    /// Playing phase the world stands still and pending time is discarded.
    pub fn advance(&mut self, delta: Duration) {
        if self.state.phase != Phase::Playing {
            self.clock.drain();
            return;
        }

        for _ in 0..self.clock.advance(delta) {
            let intent = self.buffer.pop();
            let outcome = self.engine.tick(&mut self.state, intent);
            if outcome.ended.is_some() {
                self.metrics.on_round_over(self.state.score);
                break;
            }
        }
    }

    /// Draw the screen for the current phase, exactly once per loop
    /// iteration. Paused reuses the playing frame with a frozen delta.
    pub fn render_frame(&self, renderer: &mut dyn Renderer, delta: f32) {
        match self.state.phase {
            Phase::Menu => renderer.render_menu(&self.state, delta),
            Phase::Playing => renderer.render(&self.state, delta),
            Phase::Paused => renderer.render(&self.state, 0.0),
            Phase::GameOver => renderer.render_game_over(&self.state, delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EndReason, Food, Position, Snake};

    const TICK: Duration = Duration::from_millis(100);

    fn playing_session() -> Session {
        let mut session = Session::with_seed(GameConfig::default(), 11);
        session.handle_input(Input::Enter);
        assert_eq!(session.state().phase, Phase::Playing);
        session
    }

    /// A renderer that records which screens were drawn
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<&'static str>,
        deltas: Vec<f32>,
    }

    impl Renderer for RecordingRenderer {
        fn init(&mut self, _width: usize, _height: usize) {}
        fn render(&mut self, _state: &GameState, delta: f32) {
            self.frames.push("play");
            self.deltas.push(delta);
        }
        fn render_menu(&mut self, _state: &GameState, delta: f32) {
            self.frames.push("menu");
            self.deltas.push(delta);
        }
        fn render_game_over(&mut self, _state: &GameState, delta: f32) {
            self.frames.push("over");
            self.deltas.push(delta);
        }
        fn poll_input(&mut self) -> Input {
            Input::None
        }
    }

    #[test]
    fn test_enter_starts_round_from_menu() {
        let mut session = Session::with_seed(GameConfig::default(), 11);
        assert_eq!(session.state().phase, Phase::Menu);
        assert_eq!(session.handle_input(Input::Enter), Control::Continue);
        assert_eq!(session.state().phase, Phase::Playing);
    }

    #[test]
    fn test_quit_and_switch_are_routed_upward() {
        let mut session = playing_session();
        assert_eq!(session.handle_input(Input::Quit), Control::Quit);
        assert_eq!(
            session.handle_input(Input::SwitchBackend3),
            Control::SwitchBackend(2)
        );
    }

    #[test]
    fn test_switch_command_leaves_state_untouched() {
        let mut session = playing_session();
        session.advance(TICK * 3);
        let before = session.state().clone();

        let control = session.handle_input(Input::SwitchBackend2);

        assert_eq!(control, Control::SwitchBackend(1));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_ticks_consume_buffered_intents_in_order() {
        let mut session = playing_session();
        // Head starts at (10,10) facing Left
        session.handle_input(Input::Down);
        session.handle_input(Input::Right);

        session.advance(TICK);
        assert_eq!(session.state().snake.head(), Position::new(10, 11));
        session.advance(TICK);
        assert_eq!(session.state().snake.head(), Position::new(11, 11));
    }

    #[test]
    fn test_world_frozen_while_paused() {
        let mut session = playing_session();
        session.handle_input(Input::Pause);
        assert_eq!(session.state().phase, Phase::Paused);

        let before = session.state().clone();
        session.advance(TICK * 10);
        assert_eq!(session.state(), &before);

        // Resuming does not replay the paused time as a tick burst
        session.handle_input(Input::Pause);
        let head = session.state().snake.head();
        session.advance(Duration::from_millis(50));
        assert_eq!(session.state().snake.head(), head);
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut session = playing_session();
        // Drive the snake into the left wall; head starts at (10,10)
        for _ in 0..=10 {
            session.advance(TICK);
        }
        assert_eq!(session.state().phase, Phase::GameOver);
        assert_eq!(session.metrics().rounds_played, 1);

        session.handle_input(Input::Up); // stale intent to be discarded
        session.handle_input(Input::Enter);

        assert_eq!(session.state().phase, Phase::Menu);
        assert_eq!(session.state().score, 0);
        assert!(session.state().end.is_none());
        assert_eq!(session.state().snake.head(), Position::new(10, 10));

        // The discarded intent must not steer the fresh snake
        session.handle_input(Input::Enter);
        session.advance(TICK);
        assert_eq!(session.state().snake.head(), Position::new(9, 10));
    }

    #[test]
    fn test_eating_updates_score_through_the_session() {
        let mut session = playing_session();
        let state = &mut session.state;
        let next = state.snake.head().moved_in_direction(Direction::Left);
        state.food = Food::place(next, &state.snake, 20, 20).unwrap();
        let length = state.snake.len();

        session.advance(TICK);

        assert_eq!(session.state().score, 1);
        assert_eq!(session.state().snake.len(), length + 1);
        assert!(!session
            .state()
            .is_occupied_by_snake(session.state().food.position()));
    }

    #[test]
    fn test_wall_hit_records_round_and_freezes_score() {
        let mut session = playing_session();
        session.state.snake = Snake::new(Position::new(0, 5), Direction::Left, 4, 398);
        session.state.food =
            Food::place(Position::new(15, 15), &session.state.snake, 20, 20).unwrap();
        session.state.score = 2;

        session.advance(TICK);

        assert_eq!(session.state().phase, Phase::GameOver);
        assert_eq!(session.state().end, Some(EndReason::WallCollision));
        assert_eq!(session.state().score, 2);
        assert_eq!(session.metrics().high_score, 2);
    }

    #[test]
    fn test_render_dispatch_per_phase() {
        let mut session = Session::with_seed(GameConfig::default(), 11);
        let mut renderer = RecordingRenderer::default();

        session.render_frame(&mut renderer, 0.016);
        session.handle_input(Input::Enter);
        session.render_frame(&mut renderer, 0.016);
        session.handle_input(Input::Pause);
        session.render_frame(&mut renderer, 0.016);
        session.state.phase = Phase::GameOver;
        session.render_frame(&mut renderer, 0.016);

        assert_eq!(renderer.frames, vec!["menu", "play", "play", "over"]);
        // The paused frame renders with zero elapsed time
        assert_eq!(renderer.deltas[2], 0.0);
    }
}
