//! Application entry point for pluck-tuner
//!
//! Parses the command line, starts audio capture with the pitch detector
//! running in the capture callback, and hands the terminal to TunerApp.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

mod audio;
mod cli;
mod display;
mod tuner;

use audio::AudioCapture;
use tuner::TunerApp;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.list_devices {
        for name in audio::get_input_device_names()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = cli.tuner_config()?;
    let preset = cli.tuning_preset()?;

    let quit = Arc::new(AtomicBool::new(false));
    let (publisher, reader) = pluck_tuner::handoff::channel();
    let audio_capture = AudioCapture::start(
        &config,
        cli.device.as_deref(),
        publisher,
        Arc::clone(&quit),
    )?;

    let mut app = TunerApp::new(reader, preset, &audio_capture, config.window_size, quit);

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();

    drop(audio_capture);
    result
}
