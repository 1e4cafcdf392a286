//! Audio input capture and device management
//!
//! Opens an input stream, cuts the incoming audio into analysis frames and
//! runs the pitch detector directly inside the capture callback. Results
//! leave the callback through the lock-free handoff only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Sample, SampleFormat, Stream, StreamConfig, SupportedStreamConfigRange};

use pluck_tuner::{FrameAssembler, PitchDetector, ResultPublisher, TunerConfig};

/// Everything the capture callback owns once the stream is built.
struct FrameSink {
    channels: usize,
    detector: PitchDetector,
    publisher: ResultPublisher,
    quit: Arc<AtomicBool>,
}

pub struct AudioCapture {
    _stream: Stream,
    device_name: String,
    sample_rate: u32,
}

impl AudioCapture {
    /// Starts capturing from the input device matching `device_filter`, or
    /// the default input device when no filter is given.
    ///
    /// `quit` is raised if the device disappears while the stream is running.
    pub fn start(
        config: &TunerConfig,
        device_filter: Option<&str>,
        publisher: ResultPublisher,
        quit: Arc<AtomicBool>,
    ) -> Result<Self> {
        let device = select_input_device(device_filter)?;
        let device_name = device.name()?;

        let requested_rate = config.sample_rate.round() as u32;
        let supported =
            find_supported_config(device.supported_input_configs()?.collect(), requested_rate)
                .ok_or_else(|| anyhow::anyhow!("No usable input format on {}", device_name))?;

        let sample_rate = requested_rate.clamp(
            supported.min_sample_rate().0,
            supported.max_sample_rate().0,
        );
        let supported = supported.with_sample_rate(cpal::SampleRate(sample_rate));
        let sample_format = supported.sample_format();
        let channels = supported.channels() as usize;
        let stream_config: StreamConfig = supported.into();

        log::info!("Input device: {}", device_name);
        log::info!(
            "Stream config: {} Hz, {} channel(s), {:?}",
            sample_rate,
            channels,
            sample_format
        );
        if sample_rate != requested_rate {
            log::warn!(
                "Requested {} Hz but the device runs at {} Hz",
                requested_rate,
                sample_rate
            );
        }

        let detector = PitchDetector::new(config.clone().with_sample_rate(f64::from(sample_rate)))?;

        let sink = FrameSink {
            channels,
            detector,
            publisher,
            quit,
        };

        let stream = match sample_format {
            SampleFormat::I8 => Self::create_stream::<i8>(&device, &stream_config, sink)?,
            SampleFormat::I16 => Self::create_stream::<i16>(&device, &stream_config, sink)?,
            SampleFormat::I32 => Self::create_stream::<i32>(&device, &stream_config, sink)?,
            SampleFormat::I64 => Self::create_stream::<i64>(&device, &stream_config, sink)?,
            SampleFormat::U8 => Self::create_stream::<u8>(&device, &stream_config, sink)?,
            SampleFormat::U16 => Self::create_stream::<u16>(&device, &stream_config, sink)?,
            SampleFormat::U32 => Self::create_stream::<u32>(&device, &stream_config, sink)?,
            SampleFormat::U64 => Self::create_stream::<u64>(&device, &stream_config, sink)?,
            SampleFormat::F32 => Self::create_stream::<f32>(&device, &stream_config, sink)?,
            SampleFormat::F64 => Self::create_stream::<f64>(&device, &stream_config, sink)?,
            _ => return Err(anyhow::anyhow!("Unsupported sample format {:?}", sample_format)),
        };

        stream.play()?;

        Ok(Self {
            _stream: stream,
            device_name,
            sample_rate,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn create_stream<T>(device: &Device, config: &StreamConfig, sink: FrameSink) -> Result<Stream>
    where
        T: Sample + cpal::SizedSample + Send + 'static,
        f64: cpal::FromSample<T>,
    {
        let FrameSink {
            channels,
            mut detector,
            mut publisher,
            quit,
        } = sink;
        let mut assembler = FrameAssembler::<T>::new(detector.config().window_size, channels);
        let mut error_reported = false;

        let stream = device.build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                assembler.push(data, |frame| match detector.process(frame) {
                    Ok(Some(result)) => publisher.publish(result),
                    Ok(None) => {}
                    Err(err) => {
                        if !error_reported {
                            log::error!("Dropping audio frames: {}", err);
                            error_reported = true;
                        }
                    }
                });
            },
            move |err| {
                log::error!("Audio stream error: {}", err);
                if let cpal::StreamError::DeviceNotAvailable = err {
                    quit.store(true, Ordering::Relaxed);
                }
            },
            None,
        )?;

        Ok(stream)
    }
}

/// Picks the supported range closest to what the detector wants: one that
/// covers `target_rate`, with as few channels as possible, preferring float
/// and 16-bit formats.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs.into_iter().min_by_key(|c| {
        let min_rate = c.min_sample_rate().0;
        let max_rate = c.max_sample_rate().0;
        let rate_distance = if target_rate < min_rate {
            min_rate - target_rate
        } else {
            target_rate.saturating_sub(max_rate)
        };
        let format_rank = match c.sample_format() {
            SampleFormat::F32 => 0,
            SampleFormat::I16 => 1,
            _ => 2,
        };
        (rate_distance, c.channels(), format_rank)
    })
}

fn select_input_device(filter: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();

    match filter {
        Some(filter) => {
            let needle = filter.to_lowercase();
            for device in host.input_devices()? {
                if let Ok(name) = device.name() {
                    if name.to_lowercase().contains(&needle) {
                        return Ok(device);
                    }
                }
            }
            Err(anyhow::anyhow!("No input device matching '{}'", filter))
        }
        None => host
            .default_input_device()
            .ok_or_else(|| anyhow::anyhow!("No input device available")),
    }
}

pub fn get_input_device_names() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let mut names = Vec::new();

    for device in host.input_devices()? {
        if let Ok(name) = device.name() {
            names.push(name);
        }
    }

    Ok(names)
}
