//! Terminal rendering of the current tuning result

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use pluck_tuner::{StringTarget, TuningPreset, TuningResult};

/// The meter spans ±50 cents from end to end.
const METER_RANGE_CENTS: f64 = 50.0;

pub struct DisplayState<'a> {
    pub result: Option<&'a TuningResult>,
    pub string: Option<StringTarget>,
    pub preset: &'a TuningPreset,
    pub device_name: &'a str,
    pub sample_rate: u32,
    pub window_size: usize,
}

pub fn tuning_color(cents: f64) -> Color {
    if cents.abs() < 5.0 {
        Color::Green
    } else if cents.abs() < 20.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Cell index of the needle on a meter `width` cells wide.
pub fn needle_position(cents: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let centre = (width - 1) as f64 / 2.0;
    let normalized = (cents / METER_RANGE_CENTS).clamp(-1.0, 1.0);
    (centre + normalized * centre).round() as usize
}

pub fn draw(frame: &mut Frame, state: &DisplayState) {
    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_readout(frame, chunks[0], state);
    draw_meter(frame, chunks[1], state.result.map(|r| r.cents_offset));
    draw_strings(frame, chunks[2], state);
    draw_footer(frame, chunks[4], state);
}

fn draw_readout(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let label = Style::default().fg(Color::DarkGray);

    let lines = match state.result {
        Some(result) => {
            let colour = tuning_color(result.cents_offset);
            vec![
                Line::from(vec![
                    Span::styled("Frequency: ", label),
                    Span::raw(format!("{:.2} Hz", result.measured_frequency)),
                ]),
                Line::from(vec![
                    Span::styled("Note:      ", label),
                    Span::styled(
                        result.nearest_note.to_string(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Target:    ", label),
                    Span::raw(format!("{:.2} Hz", result.nearest_note.reference_frequency)),
                ]),
                Line::from(vec![
                    Span::styled("Cents off: ", label),
                    Span::styled(
                        format!("{:+.2}", result.cents_offset),
                        Style::default().fg(colour),
                    ),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled("♪ Play a note...", label))],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" pluck-tuner "));
    frame.render_widget(paragraph, area);
}

fn draw_meter(frame: &mut Frame, area: Rect, cents: Option<f64>) {
    let block = Block::default().borders(Borders::ALL).title(" -50 ... 0 ... +50 ");
    let width = block.inner(area).width as usize;

    let line = match cents {
        Some(cents) => {
            let needle = needle_position(cents, width);
            Line::from(vec![
                Span::raw("-".repeat(needle)),
                Span::styled(
                    "|",
                    Style::default()
                        .fg(tuning_color(cents))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("-".repeat(width.saturating_sub(needle + 1))),
            ])
        }
        None => Line::from("-".repeat(width)),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_strings(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let mut spans = Vec::new();
    for (i, string) in state.preset.strings.iter().enumerate().rev() {
        let active = state.string.map(|s| s.number == i + 1).unwrap_or(false);
        let style = if active {
            let cents = state.string.map(|s| s.cents_offset).unwrap_or(0.0);
            Style::default()
                .fg(tuning_color(cents))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", string.note), style));
        spans.push(Span::raw(" "));
    }

    if let Some(target) = state.string {
        spans.push(Span::styled(
            format!(
                "string {} {:.2} Hz {:+.1}c",
                target.number, target.string.frequency, target.cents_offset
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = format!(" {} ", state.preset.name);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let text = format!(
        " q quit  p next preset  |  {} @ {} Hz, {} samples",
        state.device_name, state.sample_rate, state.window_size
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_position() {
        assert_eq!(needle_position(0.0, 59), 29);
        assert_eq!(needle_position(-50.0, 59), 0);
        assert_eq!(needle_position(50.0, 59), 58);
        assert_eq!(needle_position(500.0, 59), 58);
        assert_eq!(needle_position(-25.0, 59), 15);
        assert_eq!(needle_position(10.0, 0), 0);
    }

    #[test]
    fn test_tuning_color() {
        assert_eq!(tuning_color(2.0), Color::Green);
        assert_eq!(tuning_color(-12.0), Color::Yellow);
        assert_eq!(tuning_color(30.0), Color::Red);
    }
}
