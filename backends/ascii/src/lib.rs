//! Plain-cell terminal renderer backend
//!
//! Draws the arena with queued crossterm commands and ASCII glyphs, no
//! widget layer. Like the other backends it owns the raw-mode alternate
//! screen on stderr between `init` and destruction.

use std::io::{stderr, Stderr, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute, queue};

use viper::export_renderer;
use viper::game::{EndReason, GameState, Position};
use viper::render::{Input, Renderer};

export_renderer!(AsciiRenderer::new());

pub struct AsciiRenderer {
    out: Stderr,
    active: bool,
}

impl AsciiRenderer {
    fn new() -> Self {
        Self {
            out: stderr(),
            active: false,
        }
    }

    fn draw_border(&mut self, width: usize, height: usize) {
        let horizontal: String = std::iter::once('+')
            .chain(std::iter::repeat('-').take(width))
            .chain(std::iter::once('+'))
            .collect();

        let _ = queue!(self.out, cursor::MoveTo(0, 0), Print(&horizontal));
        for y in 0..height {
            let _ = queue!(
                self.out,
                cursor::MoveTo(0, (y + 1) as u16),
                Print("|"),
                cursor::MoveTo((width + 1) as u16, (y + 1) as u16),
                Print("|")
            );
        }
        let _ = queue!(
            self.out,
            cursor::MoveTo(0, (height + 1) as u16),
            Print(&horizontal)
        );
    }

    fn draw_status(&mut self, state: &GameState, line: &str) {
        let _ = queue!(
            self.out,
            cursor::MoveTo(0, (state.height + 2) as u16),
            Clear(ClearType::CurrentLine),
            ResetColor,
            Print(format!("Score: {}   Length: {}", state.score, state.snake.len())),
            cursor::MoveTo(0, (state.height + 3) as u16),
            Clear(ClearType::CurrentLine),
            Print(line)
        );
    }
}

impl Renderer for AsciiRenderer {
    fn init(&mut self, _width: usize, _height: usize) {
        if terminal::enable_raw_mode().is_err() {
            return;
        }
        let _ = execute!(
            self.out,
            terminal::EnterAlternateScreen,
            Clear(ClearType::All),
            cursor::Hide
        );
        self.active = true;
    }

    fn render(&mut self, state: &GameState, _delta: f32) {
        if !self.active {
            return;
        }
        let _ = queue!(self.out, Clear(ClearType::All));
        self.draw_border(state.width, state.height);

        let head = state.snake.head();
        for segment in state.snake.segments() {
            let glyph = if *segment == head { "O" } else { "o" };
            let _ = queue!(
                self.out,
                cursor::MoveTo((segment.x + 1) as u16, (segment.y + 1) as u16),
                SetForegroundColor(Color::Green),
                Print(glyph)
            );
        }

        let food = state.food.position();
        let _ = queue!(
            self.out,
            cursor::MoveTo((food.x + 1) as u16, (food.y + 1) as u16),
            SetForegroundColor(Color::Red),
            Print("*"),
            ResetColor
        );

        self.draw_status(state, "Arrows/WASD move | P pause | 1/2/3 renderer | Q quit");
        let _ = self.out.flush();
    }

    fn render_menu(&mut self, state: &GameState, _delta: f32) {
        if !self.active {
            return;
        }
        let _ = queue!(self.out, Clear(ClearType::All));
        self.draw_border(state.width, state.height);

        let center = Position::new((state.width / 2) as i32, (state.height / 2) as i32);
        let _ = queue!(
            self.out,
            cursor::MoveTo(center.x.saturating_sub(2) as u16, center.y as u16),
            SetForegroundColor(Color::Green),
            Print("VIPER"),
            ResetColor
        );
        self.draw_status(state, "Press Enter to play");
        let _ = self.out.flush();
    }

    fn render_game_over(&mut self, state: &GameState, _delta: f32) {
        if !self.active {
            return;
        }
        let _ = queue!(self.out, Clear(ClearType::All));
        self.draw_border(state.width, state.height);

        let (banner, color) = match state.end {
            Some(EndReason::ArenaFull) => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };
        let x = (state.width / 2).saturating_sub(banner.len() / 2);
        let _ = queue!(
            self.out,
            cursor::MoveTo((x + 1) as u16, (state.height / 2) as u16),
            SetForegroundColor(color),
            Print(banner),
            ResetColor
        );
        self.draw_status(state, "Press Enter for the menu | Q quit");
        let _ = self.out.flush();
    }

    fn poll_input(&mut self) -> Input {
        if !matches!(event::poll(Duration::ZERO), Ok(true)) {
            return Input::None;
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => map_key(key),
            _ => Input::None,
        }
    }
}

impl Drop for AsciiRenderer {
    fn drop(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        }
    }
}

fn map_key(key: KeyEvent) -> Input {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Input::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Input::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Input::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Input::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Input::Right,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Input::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') => Input::Pause,
        KeyCode::Enter => Input::Enter,
        KeyCode::Char('1') => Input::SwitchBackend1,
        KeyCode::Char('2') => Input::SwitchBackend2,
        KeyCode::Char('3') => Input::SwitchBackend3,
        _ => Input::None,
    }
}
