//! Keystroke history table - the shaped parameters of recent keys

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use super::{EventResult, UiState};

/// Render the history table, newest first
pub fn render_history(frame: &mut Frame, area: Rect, state: &UiState) {
    let header = Row::new(["Key", "Vel", "Pan", "Vol", "L", "R", "Pitch", "Delay", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = state.history.iter().map(|record| {
        let s = &record.shaped;
        let result_style = match record.result {
            EventResult::Played => Style::default().fg(Color::Green),
            EventResult::NoAsset => Style::default().fg(Color::DarkGray),
            EventResult::NoChannel | EventResult::Failed => Style::default().fg(Color::Red),
        };
        Row::new(vec![
            Cell::from(record.key.clone()),
            Cell::from(format!("{:.2}", s.velocity)),
            Cell::from(format!("{:+.2}", s.pan)),
            Cell::from(format!("{:.2}", s.volume)),
            Cell::from(format!("{:.2}", s.left_gain)),
            Cell::from(format!("{:.2}", s.right_gain)),
            Cell::from(format!("{:+.3}", s.pitch_offset)),
            Cell::from(format!("{:.1}ms", s.timing_jitter * 1000.0)),
            Cell::from(record.result.label()).style(result_style),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Keystrokes ").borders(Borders::ALL));

    frame.render_widget(table, area);
}
