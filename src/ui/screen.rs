use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};

pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("0-9 -", "type into the focused box"),
    ("Tab / Shift+Tab", "move between boxes"),
    ("Up / Down", "adjust minutes or seconds"),
    ("Enter", "start, calculate or start countdown for the focused box"),
    ("s", "start tracking"),
    ("x", "stop tracking"),
    ("r", "reset the session"),
    ("c", "calculate results"),
    ("g", "start countdown"),
    ("h", "stop countdown"),
    ("a", "toggle countdown auto reset"),
    ("[ / ]", "lower / raise opacity"),
    ("?", "toggle this help"),
    ("Esc / Ctrl+C", "quit"),
];

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Tracker, countdown and results in one overlay
pub struct MainScreen;

impl Screen for MainScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        let base = Style::default().bg(app.opacity.background()).fg(Color::White);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let lines: Vec<Line> = KEY_BINDINGS
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("{keys:>16}  "),
                        base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, base),
                ])
            })
            .collect();

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Keys")
                .style(base),
        );
        f.render_widget(help, chunks[0]);

        let footer = Paragraph::new("(?) or (b)ack to return")
            .style(base.add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center);
        f.render_widget(footer, chunks[1]);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Main => Box::new(MainScreen),
        AppState::Help => Box::new(HelpScreen),
    }
}
