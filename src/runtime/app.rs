use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::game::GameConfig;
use crate::loader::BackendLoader;

use super::session::{Control, Session};

/// Breather between iterations so the loop does not spin a core
const LOOP_SLEEP: Duration = Duration::from_millis(1);

/// The fixed-timestep main loop
///
/// Each iteration, strictly in order: measure the wall-clock delta, poll the
/// active backend once for input, route it, run zero or more simulation
/// ticks, and render exactly once. The session never sees the loader and the
/// loader never sees the session, so a backend hot-swap leaves the world
/// untouched.
pub struct App {
    session: Session,
    loader: BackendLoader,
    backends: Vec<PathBuf>,
    current: usize,
}

impl App {
    pub fn new(config: GameConfig, backends: Vec<PathBuf>) -> Self {
        Self {
            session: Session::new(config),
            loader: BackendLoader::new(),
            backends,
            current: 0,
        }
    }

    /// Run until the user quits. Failure to load the initial backend is
    /// fatal; a failed hot-swap later is survived by restoring the previous
    /// backend.
    pub fn run(&mut self) -> Result<()> {
        let initial = self.backends.first().cloned().context("no backend paths configured")?;
        self.loader
            .load(&initial)
            .context("failed to load the initial renderer backend")?;
        self.init_renderer()?;

        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let delta = now - last;
            last = now;

            let input = match self.loader.renderer() {
                Some(renderer) => renderer.poll_input(),
                None => bail!("no renderer backend is active"),
            };

            match self.session.handle_input(input) {
                Control::Quit => break,
                Control::SwitchBackend(slot) => self.switch_backend(slot)?,
                Control::Continue => {}
            }

            self.session.advance(delta);

            if let Some(renderer) = self.loader.renderer() {
                self.session.render_frame(renderer, delta.as_secs_f32());
            }

            thread::sleep(LOOP_SLEEP);
        }

        let metrics = self.session.metrics();
        info!(
            rounds = metrics.rounds_played,
            high_score = metrics.high_score,
            elapsed = %metrics.format_elapsed(),
            "session over"
        );
        Ok(())
    }

    /// Hot-swap to the backend in `slot`: unload the active module, load the
    /// requested one, size it to the arena, and carry on. Game state is not
    /// involved at any point.
    fn switch_backend(&mut self, slot: usize) -> Result<()> {
        if slot >= self.backends.len() || slot == self.current {
            return Ok(());
        }

        let previous = self.backends[self.current].clone();
        let target = self.backends[slot].clone();
        info!(from = %previous.display(), to = %target.display(), "switching renderer backend");

        self.loader.unload();
        match self.loader.load(&target) {
            Ok(()) => {
                self.current = slot;
            }
            Err(err) => {
                warn!(error = %err, "backend switch failed, restoring previous backend");
                self.loader
                    .load(&previous)
                    .context("could not restore the previous backend after a failed switch")?;
            }
        }
        self.init_renderer()
    }

    fn init_renderer(&mut self) -> Result<()> {
        let (width, height) = {
            let config = self.session.config();
            (config.width, config.height)
        };
        match self.loader.renderer() {
            Some(renderer) => {
                renderer.init(width, height);
                Ok(())
            }
            None => bail!("no renderer backend is active"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_without_backends_fails() {
        let mut app = App::new(GameConfig::small(), Vec::new());
        assert!(app.run().is_err());
    }

    #[test]
    fn test_run_with_missing_initial_backend_fails() {
        let mut app = App::new(
            GameConfig::small(),
            vec![PathBuf::from("/nonexistent/libviper_backend_tui.so")],
        );
        assert!(app.run().is_err());
    }
}
