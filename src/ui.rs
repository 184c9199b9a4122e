pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::{
    app::{App, Focus},
    input::TextInput,
    opacity::Opacity,
};

const HORIZONTAL_MARGIN: u16 = 1;

/// Styles derived from the current opacity
struct Palette {
    base: Style,
    bold: Style,
    focused: Style,
    disabled: Style,
    placeholder: Style,
}

impl Palette {
    fn new(opacity: &Opacity) -> Self {
        let mut base = Style::default().bg(opacity.background()).fg(Color::White);
        if opacity.dims_text() {
            base = base.add_modifier(Modifier::DIM);
        }

        Self {
            base,
            bold: base.add_modifier(Modifier::BOLD),
            focused: base
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            disabled: base.fg(Color::DarkGray),
            placeholder: base.fg(Color::Gray).add_modifier(Modifier::ITALIC),
        }
    }

    fn group(&self, title: impl Into<String>) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .title(title.into())
            .style(self.base)
    }
}

fn text_field<'a>(
    label: &'a str,
    input: &'a TextInput,
    focused: bool,
    enabled: bool,
    palette: &Palette,
) -> Line<'a> {
    let value = if input.is_empty() {
        Span::styled(input.placeholder, palette.placeholder)
    } else if !enabled {
        Span::styled(input.value(), palette.disabled)
    } else if focused {
        Span::styled(input.value(), palette.focused)
    } else {
        Span::styled(input.value(), palette.base)
    };

    let mut spans = vec![Span::styled(format!("{label:<13}"), palette.base), value];
    if focused && enabled {
        spans.push(Span::styled("_", palette.focused));
    }
    Line::from(spans)
}

fn spin_field(
    label: &str,
    value: u32,
    focused: bool,
    enabled: bool,
    palette: &Palette,
) -> Vec<Span<'static>> {
    let style = match (enabled, focused) {
        (false, _) => palette.disabled,
        (true, true) => palette.focused,
        (true, false) => palette.base,
    };

    vec![
        Span::styled(format!("{label}: "), palette.base),
        Span::styled(format!("[{value:>2}]"), style),
    ]
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::new(&self.opacity);
        Block::default().style(palette.base).render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(3), // opacity
                Constraint::Length(4), // xp inputs
                Constraint::Length(3), // session timer
                Constraint::Length(5), // countdown
                Constraint::Length(5), // results
                Constraint::Length(1), // status
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("XP Tracker", palette.bold))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Gauge::default()
            .block(palette.group("Window Opacity ([ / ])"))
            .gauge_style(palette.base.fg(Color::Cyan))
            .ratio(self.opacity.ratio())
            .label(format!("{}%", self.opacity.percent()))
            .render(chunks[1], buf);

        let focus_on = |f: Focus| self.focus == Some(f);
        let xp_lines = vec![
            text_field(
                "Starting XP:",
                &self.start_xp,
                focus_on(Focus::StartXp),
                self.is_enabled(Focus::StartXp),
                &palette,
            ),
            text_field(
                "Ending XP:",
                &self.end_xp,
                focus_on(Focus::EndXp),
                self.is_enabled(Focus::EndXp),
                &palette,
            ),
        ];
        Paragraph::new(xp_lines)
            .block(palette.group("XP Tracking"))
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(self.tracker.elapsed_display(), palette.bold))
            .alignment(Alignment::Center)
            .block(palette.group(format!("XP Session Timer ({})", self.tracker.phase())))
            .render(chunks[3], buf);

        let mut settings = spin_field(
            "Minutes",
            self.minutes.value(),
            focus_on(Focus::Minutes),
            self.is_enabled(Focus::Minutes),
            &palette,
        );
        settings.push(Span::styled("   ", palette.base));
        settings.extend(spin_field(
            "Seconds",
            self.seconds.value(),
            focus_on(Focus::Seconds),
            self.is_enabled(Focus::Seconds),
            &palette,
        ));

        let auto_reset = if self.countdown.auto_reset() {
            "[x] Auto Reset"
        } else {
            "[ ] Auto Reset"
        };

        Paragraph::new(vec![
            Line::from(settings),
            Line::from(Span::styled(self.countdown.display(), palette.bold))
                .alignment(Alignment::Center),
            Line::from(Span::styled(auto_reset, palette.base)),
        ])
        .block(palette.group(format!("Countdown Timer ({})", self.countdown.phase())))
        .render(chunks[4], buf);

        let results: Vec<Line> = self
            .result_lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, palette.base)))
            .collect();
        Paragraph::new(results)
            .block(palette.group("Results"))
            .render(chunks[5], buf);

        Paragraph::new(Span::styled(self.status.as_str(), palette.base))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        Paragraph::new(Span::styled(
            "(s)tart (x)stop (r)eset (c)alc | (g)o (h)alt (a)uto | (?)help (esc)ape",
            palette.base.add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
    }
}
