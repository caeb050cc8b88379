//! Green-phosphor terminal renderer backend
//!
//! Same cell grid as the ascii backend but styled like an old monochrome
//! display: everything in shades of green, block glyphs, and a food marker
//! that blinks on the frame delta and is re-rolled from a glyph set each
//! time it is eaten.

use std::io::{stderr, Stderr, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute, queue};
use rand::seq::SliceRandom;
use rand::thread_rng;

use viper::export_renderer;
use viper::game::{EndReason, GameState};
use viper::render::{Input, Renderer};

export_renderer!(RetroRenderer::new());

const FOOD_GLYPHS: [&str; 5] = ["¤", "§", "¥", "&", "@"];
const BLINK_PERIOD: f32 = 0.6;

pub struct RetroRenderer {
    out: Stderr,
    active: bool,
    blink: f32,
    food_glyph: &'static str,
    last_score: u32,
}

impl RetroRenderer {
    fn new() -> Self {
        Self {
            out: stderr(),
            active: false,
            blink: 0.0,
            food_glyph: FOOD_GLYPHS[0],
            last_score: 0,
        }
    }

    fn roll_food_glyph(&mut self) {
        if let Some(glyph) = FOOD_GLYPHS.choose(&mut thread_rng()) {
            self.food_glyph = glyph;
        }
    }

    fn draw_frame(&mut self, state: &GameState) {
        let _ = queue!(
            self.out,
            Clear(ClearType::All),
            SetForegroundColor(Color::DarkGreen)
        );

        let horizontal: String = "═".repeat(state.width);
        let _ = queue!(
            self.out,
            cursor::MoveTo(0, 0),
            Print(format!("╔{horizontal}╗"))
        );
        for y in 0..state.height {
            let _ = queue!(
                self.out,
                cursor::MoveTo(0, (y + 1) as u16),
                Print("║"),
                cursor::MoveTo((state.width + 1) as u16, (y + 1) as u16),
                Print("║")
            );
        }
        let _ = queue!(
            self.out,
            cursor::MoveTo(0, (state.height + 1) as u16),
            Print(format!("╚{horizontal}╝"))
        );
    }

    fn draw_status(&mut self, state: &GameState, line: &str) {
        let _ = queue!(
            self.out,
            cursor::MoveTo(0, (state.height + 2) as u16),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Green),
            Print(format!("SCORE {:04}   LEN {:03}", state.score, state.snake.len())),
            cursor::MoveTo(0, (state.height + 3) as u16),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGreen),
            Print(line),
            ResetColor
        );
    }

    fn draw_centered(&mut self, state: &GameState, text: &str, row_offset: i32) {
        let x = (state.width / 2).saturating_sub(text.len() / 2);
        let y = (state.height as i32 / 2 + row_offset).max(0);
        let _ = queue!(
            self.out,
            cursor::MoveTo((x + 1) as u16, (y + 1) as u16),
            Print(text)
        );
    }
}

impl Renderer for RetroRenderer {
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
        self.roll_food_glyph();
    }

    fn render(&mut self, state: &GameState, delta: f32) {
        if !self.active {
            return;
        }
        self.blink = (self.blink + delta) % BLINK_PERIOD;
        if state.score != self.last_score {
            self.last_score = state.score;
            self.roll_food_glyph();
        }

        self.draw_frame(state);

        let head = state.snake.head();
        for segment in state.snake.segments() {
            let glyph = if *segment == head { "█" } else { "▓" };
            let _ = queue!(
                self.out,
                cursor::MoveTo((segment.x + 1) as u16, (segment.y + 1) as u16),
                SetForegroundColor(Color::Green),
                Print(glyph)
            );
        }

        // Blink duty cycle of one half period; a zero delta (paused frame)
        // holds whatever phase it was in
        if self.blink < BLINK_PERIOD / 2.0 {
            let food = state.food.position();
            let _ = queue!(
                self.out,
                cursor::MoveTo((food.x + 1) as u16, (food.y + 1) as u16),
                SetForegroundColor(Color::Green),
                Print(self.food_glyph)
            );
        }

        self.draw_status(state, "WASD/ARROWS MOVE  P PAUSE  1/2/3 RENDERER  Q QUIT");
        let _ = self.out.flush();
    }

    fn render_menu(&mut self, state: &GameState, _delta: f32) {
        if !self.active {
            return;
        }
        self.draw_frame(state);
        let _ = queue!(self.out, SetForegroundColor(Color::Green));
        self.draw_centered(state, "V I P E R", -1);
        self.draw_centered(state, "PRESS ENTER", 1);
        self.draw_status(state, "INSERT COIN");
        let _ = self.out.flush();
    }

    fn render_game_over(&mut self, state: &GameState, _delta: f32) {
        if !self.active {
            return;
        }
        self.draw_frame(state);
        let banner = match state.end {
            Some(EndReason::ArenaFull) => "YOU WIN",
            _ => "GAME OVER",
        };
        let _ = queue!(self.out, SetForegroundColor(Color::Green));
        self.draw_centered(state, banner, -1);
        self.draw_centered(state, "ENTER FOR MENU", 1);
        self.draw_status(state, "Q QUIT");
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

impl Drop for RetroRenderer {
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
