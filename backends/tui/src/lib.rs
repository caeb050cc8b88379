//! Ratatui renderer backend
//!
//! Draws the arena as a widget tree on the alternate screen of stderr, so
//! stdout stays free for the core's log lines. The terminal session is
//! acquired in `init` and restored when the core destroys this renderer
//! through the plugin ABI.

use std::io::{stderr, Stderr};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};

use viper::export_renderer;
use viper::game::{EndReason, GameState, Position};
use viper::render::{Input, Renderer};

export_renderer!(TuiRenderer::new());

pub struct TuiRenderer {
    terminal: Option<Terminal<CrosstermBackend<Stderr>>>,
}

impl TuiRenderer {
    fn new() -> Self {
        Self { terminal: None }
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame)) {
        if let Some(terminal) = &mut self.terminal {
            let _ = terminal.draw(draw_fn);
        }
    }
}

impl Renderer for TuiRenderer {
    fn init(&mut self, _width: usize, _height: usize) {
        if enable_raw_mode().is_err() {
            return;
        }
        let mut out = stderr();
        let _ = execute!(out, EnterAlternateScreen);
        if let Ok(mut terminal) = Terminal::new(CrosstermBackend::new(out)) {
            let _ = terminal.hide_cursor();
            let _ = terminal.clear();
            self.terminal = Some(terminal);
        }
    }

    fn render(&mut self, state: &GameState, _delta: f32) {
        self.draw(|frame| draw_playing(frame, state));
    }

    fn render_menu(&mut self, state: &GameState, _delta: f32) {
        self.draw(|frame| draw_menu(frame, state));
    }

    fn render_game_over(&mut self, state: &GameState, _delta: f32) {
        self.draw(|frame| draw_game_over(frame, state));
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

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        if let Some(mut terminal) = self.terminal.take() {
            let _ = disable_raw_mode();
            let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
            let _ = terminal.show_cursor();
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

fn layout(frame: &Frame) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    let game_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(chunks[1])[1];

    (chunks[0], game_area, chunks[2])
}

fn draw_playing(frame: &mut Frame, state: &GameState) {
    let (header, game_area, footer) = layout(frame);
    frame.render_widget(stats_line(state), header);
    frame.render_widget(grid(state), game_area);
    frame.render_widget(controls_line(), footer);
}

fn draw_menu(frame: &mut Frame, state: &GameState) {
    let (header, game_area, footer) = layout(frame);
    frame.render_widget(stats_line(state), header);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "V I P E R",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("{} x {} arena", state.width, state.height)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play", Style::default().fg(Color::Gray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        ),
        game_area,
    );
    frame.render_widget(controls_line(), footer);
}

fn draw_game_over(frame: &mut Frame, state: &GameState) {
    let (header, game_area, footer) = layout(frame);
    frame.render_widget(stats_line(state), header);

    let (title, color) = match state.end {
        Some(EndReason::ArenaFull) => ("YOU WIN", Color::Green),
        _ => ("GAME OVER", Color::Red),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        game_area,
    );
    frame.render_widget(controls_line(), footer);
}

fn grid(state: &GameState) -> Paragraph<'_> {
    let head = state.snake.head();
    let food = state.food.position();
    let mut lines = Vec::with_capacity(state.height);

    for y in 0..state.height {
        let mut spans = Vec::with_capacity(state.width);

        for x in 0..state.width {
            let pos = Position::new(x as i32, y as i32);

            let cell = if pos == head {
                Span::styled(
                    "■ ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else if state.is_occupied_by_snake(pos) {
                Span::styled("□ ", Style::default().fg(Color::Green))
            } else if pos == food {
                Span::styled(
                    "O ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(". ", Style::default().fg(Color::DarkGray))
            };

            spans.push(cell);
        }

        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" viper "),
        )
        .alignment(Alignment::Center)
}

fn stats_line(state: &GameState) -> Paragraph<'_> {
    let text = vec![Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            state.score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Length: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            state.snake.len().to_string(),
            Style::default().fg(Color::White),
        ),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

fn controls_line() -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" move | "),
        Span::styled("P", Style::default().fg(Color::Yellow)),
        Span::raw(" pause | "),
        Span::styled("1/2/3", Style::default().fg(Color::Magenta)),
        Span::raw(" renderer | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}
