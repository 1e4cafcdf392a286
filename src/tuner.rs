//! Terminal tuner application loop
//!
//! Polls the keyboard, picks up the latest tuning result from the capture
//! callback and redraws, on a fixed cadence independent of the audio rate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use pluck_tuner::{ResultReader, TuningPreset, TuningResult};

use crate::audio::AudioCapture;
use crate::display::{self, DisplayState};

const RENDER_INTERVAL: Duration = Duration::from_millis(50);

pub struct TunerApp {
    reader: ResultReader,
    current: Option<TuningResult>,
    preset_index: usize,
    device_name: String,
    sample_rate: u32,
    window_size: usize,
    quit: Arc<AtomicBool>,
}

impl TunerApp {
    pub fn new(
        reader: ResultReader,
        preset: &TuningPreset,
        capture: &AudioCapture,
        window_size: usize,
        quit: Arc<AtomicBool>,
    ) -> Self {
        let preset_index = TuningPreset::all()
            .iter()
            .position(|p| p.name == preset.name)
            .unwrap_or(0);

        Self {
            reader,
            current: None,
            preset_index,
            device_name: capture.device_name().to_string(),
            sample_rate: capture.sample_rate(),
            window_size,
            quit,
        }
    }

    fn preset(&self) -> &'static TuningPreset {
        &TuningPreset::all()[self.preset_index]
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.quit.load(Ordering::Relaxed) {
            if self.reader.has_update() {
                self.current = self.reader.latest();
            }

            let preset = self.preset();
            let state = DisplayState {
                result: self.current.as_ref(),
                string: self
                    .current
                    .map(|result| preset.nearest_string(result.measured_frequency)),
                preset,
                device_name: &self.device_name,
                sample_rate: self.sample_rate,
                window_size: self.window_size,
            };
            terminal.draw(|frame| display::draw(frame, &state))?;

            if event::poll(RENDER_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        log::info!("Quit requested, shutting down");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.quit.store(true, Ordering::Relaxed);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit.store(true, Ordering::Relaxed);
            }
            KeyCode::Char('p') => {
                self.preset_index = (self.preset_index + 1) % TuningPreset::all().len();
                log::debug!("Switched to preset {}", self.preset().name);
            }
            _ => {}
        }
    }
}
