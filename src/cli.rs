//! Command-line configuration surface

use anyhow::Result;
use clap::Parser;

use pluck_tuner::config::{
    DEFAULT_MAX_OCTAVE, DEFAULT_MIN_AMPLITUDE, DEFAULT_MIN_OCTAVE, DEFAULT_SAMPLE_RATE,
    DEFAULT_WINDOW_SIZE,
};
use pluck_tuner::{TunerConfig, TuningPreset};

/// pluck-tuner: real-time guitar tuner for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Samples per analysis frame.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Sample rate to request from the input device, in Hz.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// RMS level a frame must exceed before it is analyzed.
    #[arg(long, default_value_t = DEFAULT_MIN_AMPLITUDE)]
    pub min_amplitude: f64,

    /// Lowest octave a note can be reported in.
    #[arg(long, default_value_t = DEFAULT_MIN_OCTAVE)]
    pub min_octave: i32,

    /// Highest octave a note can be reported in.
    #[arg(long, default_value_t = DEFAULT_MAX_OCTAVE)]
    pub max_octave: i32,

    /// Tuning preset: standard, drop-d, open-g, dadgad.
    #[arg(short, long, default_value = "standard")]
    pub preset: String,

    /// Use the first input device whose name contains this text.
    #[arg(short, long)]
    pub device: Option<String>,

    /// Print the available input devices and exit.
    #[arg(long, default_value_t = false)]
    pub list_devices: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Builds and validates the detector configuration from the flags.
    pub fn tuner_config(&self) -> Result<TunerConfig> {
        let config = TunerConfig {
            window_size: self.window_size,
            sample_rate: f64::from(self.sample_rate),
            min_amplitude: self.min_amplitude,
            min_octave: self.min_octave,
            max_octave: self.max_octave,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn tuning_preset(&self) -> Result<&'static TuningPreset> {
        TuningPreset::by_name(&self.preset).ok_or_else(|| {
            let known: Vec<&str> = TuningPreset::all().iter().map(|p| p.name).collect();
            anyhow::anyhow!(
                "Unknown preset '{}'. Available: {}",
                self.preset,
                known.join(", ")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pluck-tuner"]).unwrap();
        let config = cli.tuner_config().unwrap();

        assert_eq!(config, TunerConfig::default());
        assert_eq!(cli.tuning_preset().unwrap().name, "Standard");
        assert!(!cli.list_devices);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "pluck-tuner",
            "--window-size",
            "8192",
            "--min-amplitude",
            "0.05",
            "--preset",
            "drop-d",
        ])
        .unwrap();
        let config = cli.tuner_config().unwrap();

        assert_eq!(config.window_size, 8192);
        assert_eq!(config.min_amplitude, 0.05);
        assert_eq!(cli.tuning_preset().unwrap().name, "Drop D");
    }

    #[test]
    fn test_rejects_bad_values() {
        let cli = Cli::try_parse_from(["pluck-tuner", "--window-size", "2"]).unwrap();
        assert!(cli.tuner_config().is_err());

        let cli = Cli::try_parse_from(["pluck-tuner", "--preset", "nashville"]).unwrap();
        assert!(cli.tuning_preset().is_err());
    }
}
