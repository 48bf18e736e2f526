//! Meter widgets - velocity, limiter gain, output peak and channel usage

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use keyclack::{engine::Engine, mixer::MixerHandle};

use super::EventRecord;

/// Live levels sampled once per frame
pub struct Levels {
    pub limiter_gain: f64,
    pub peak: f32,
    pub active: usize,
    pub capacity: usize,
}

impl Levels {
    pub fn read(engine: &Engine<MixerHandle>) -> Self {
        let pool = engine.backend().pool();
        Self {
            limiter_gain: engine.limiter_gain(),
            peak: pool.peak(),
            active: pool.active(),
            capacity: pool.capacity(),
        }
    }
}

fn gauge<'a>(title: &'a str, ratio: f64, label: String, color: Color) -> Gauge<'a> {
    Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label)
}

/// Render the meter row
pub fn render_meters(frame: &mut Frame, area: Rect, levels: &Levels, last: Option<&EventRecord>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    let (velocity, pan, volume) = last
        .map(|r| (r.shaped.velocity, r.shaped.pan, r.shaped.volume))
        .unwrap_or((0.0, 0.0, 0.0));

    let gain_color = if levels.limiter_gain < 0.5 {
        Color::Red
    } else if levels.limiter_gain < 0.9 {
        Color::Yellow
    } else {
        Color::Green
    };

    frame.render_widget(
        gauge(" Velocity ", velocity as f64, format!("{velocity:.2}"), Color::Cyan),
        top[0],
    );
    frame.render_widget(
        gauge(" Volume ", volume as f64, format!("{volume:.2}"), Color::Blue),
        top[1],
    );
    frame.render_widget(
        gauge(
            " Pan ",
            (pan as f64 + 1.0) / 2.0,
            format!("{pan:+.2}"),
            Color::Magenta,
        ),
        top[2],
    );
    frame.render_widget(
        gauge(
            " Limiter gain ",
            levels.limiter_gain,
            format!("{:.3}", levels.limiter_gain),
            gain_color,
        ),
        bottom[0],
    );
    frame.render_widget(
        gauge(" Peak ", levels.peak as f64, format!("{:.2}", levels.peak), Color::White),
        bottom[1],
    );
    let usage = if levels.capacity == 0 {
        0.0
    } else {
        levels.active as f64 / levels.capacity as f64
    };
    frame.render_widget(
        gauge(
            " Channels ",
            usage,
            format!("{}/{}", levels.active, levels.capacity),
            Color::Yellow,
        ),
        bottom[2],
    );
}
