//! Status bar widget - device, loaded sounds and keystroke counters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{UiState, UiStateInit};

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, init: &UiStateInit, state: &UiState) {
    let block = Block::default().title(" keyclack ").borders(Borders::ALL);

    let sounds_style = if init.sounds_loaded == 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let specials = if init.specials.is_empty() {
        "none".to_owned()
    } else {
        init.specials.join(", ")
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} sounds ", init.sounds_loaded),
            sounds_style,
        ),
        Span::styled(
            format!("(pool {}, special: {})  ", init.pool_size, specials),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "{:.1}kHz  {}ch out  {} voices  ",
                init.sample_rate as f32 / 1000.0,
                init.device_channels,
                init.mixer_channels
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Keys: {}  Dropped: {}", state.total, state.dropped),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn status_line_shows_device_and_counters() {
        let init = UiStateInit {
            sample_rate: 44_100,
            device_channels: 2,
            mixer_channels: 64,
            sounds_loaded: 3,
            specials: vec!["space".to_owned()],
            pool_size: 2,
        };
        let state = UiState::default();

        let mut terminal = Terminal::new(TestBackend::new(140, 3)).unwrap();
        terminal
            .draw(|frame| render_status(frame, frame.area(), &init, &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol())
            .collect();
        assert!(line.contains("3 sounds"), "{line}");
        assert!(line.contains("44.1kHz  2ch out  64 voices"), "{line}");
        assert!(line.contains("Keys: 0  Dropped: 0"), "{line}");
    }
}
