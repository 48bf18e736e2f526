//! TUI module for keyclack
//!
//! Captures keystrokes, dispatches them to the engine and shows what the
//! shaping pipeline did with each one.

pub mod state;
mod history;
mod meters;
mod status;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use keyclack::{
    engine::Engine,
    io::keyboard::{classify, KeyAction},
    mixer::MixerHandle,
};

pub use state::{EventRecord, EventResult, UiState, UiStateInit};

use history::render_history;
use meters::{render_meters, Levels};
use status::render_status;

/// UI application state
pub struct UiApp {
    /// Facts captured at startup
    init: UiStateInit,
    /// Rolling keystroke history
    state: UiState,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(init: UiStateInit) -> Self {
        Self {
            init,
            state: UiState::default(),
            should_quit: false,
        }
    }

    /// Run the capture loop until ESC
    pub fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        engine: &Engine<MixerHandle>,
    ) -> EyreResult<()> {
        while !self.should_quit {
            let levels = Levels::read(engine);
            terminal.draw(|frame| self.render(frame, &levels))?;

            // Drain every pending key before redrawing (~60fps)
            if event::poll(Duration::from_millis(16))? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(engine, &key);
                    }
                    if self.should_quit {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, engine: &Engine<MixerHandle>, key: &event::KeyEvent) {
        match classify(key) {
            KeyAction::Play(key) => {
                // Scheduled triggers are fire-and-forget
                let dispatch = engine.dispatch(&key);
                self.state.record(EventRecord {
                    key: key.name,
                    shaped: dispatch.shaped,
                    result: EventResult::from_outcome(&dispatch.outcome),
                });
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Ignore => {}
        }
    }

    fn render(&self, frame: &mut Frame, levels: &Levels) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(6), // Meters
                Constraint::Min(4),    // History
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_status(frame, chunks[0], &self.init, &self.state);
        render_meters(frame, chunks[1], levels, self.state.last());
        render_history(frame, chunks[2], &self.state);

        let help = Paragraph::new(" Type to play  [Esc] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
