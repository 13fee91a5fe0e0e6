//! cpal-backed [`AudioSink`] (feature `cpal-backend`).
//!
//! `play()` pushes interleaved stereo samples into a shared ring buffer; the
//! cpal output callback drains it on the audio thread, padding with silence
//! on underrun rather than blocking.

use crate::error::DeviceError;
use crate::sink::AudioSink;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// List the names of every output-capable device on the default host.
pub fn list_output_devices() -> Result<Vec<String>, DeviceError> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| DeviceError::Io(e.to_string()))?;
    Ok(devices.filter_map(|d| d.name().ok()).collect())
}

/// Audio sink backed by a real output device via cpal.
pub struct CpalSink {
    sample_rate: u32,
    volume: Arc<Mutex<f32>>,
    buffer: Arc<Mutex<VecDeque<f32>>>,
    _stream: cpal::Stream,
}

impl CpalSink {
    /// Open the named output device (or the system default if `None`) at
    /// `sample_rate_hz`.
    pub fn open(device_name: Option<&str>, sample_rate_hz: u32) -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let device = match device_name {
            Some(name) => host
                .output_devices()
                .map_err(|e| DeviceError::Io(e.to_string()))?
                .find(|d| d.name().map(|n| n.contains(name)).unwrap_or(false))
                .ok_or_else(|| DeviceError::NotFound(name.to_string()))?,
            None => host.default_output_device().ok_or(DeviceError::NotFound("default output".into()))?,
        };

        let stream_config = cpal::StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(sample_rate_hz),
            buffer_size: cpal::BufferSize::Default,
        };

        let buffer = Arc::new(Mutex::new(VecDeque::<f32>::new()));
        let volume = Arc::new(Mutex::new(1.0f32));

        let callback_buffer = Arc::clone(&buffer);
        let callback_volume = Arc::clone(&volume);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut buf = callback_buffer.lock().unwrap();
                    let vol = *callback_volume.lock().unwrap();
                    for sample in data.iter_mut() {
                        *sample = buf.pop_front().unwrap_or(0.0) * vol;
                    }
                },
                move |err| {
                    tracing::warn!(error = %err, "cpal output stream error");
                },
                None,
            )
            .map_err(|e| DeviceError::Sink(e.to_string()))?;

        stream.play().map_err(|e| DeviceError::Sink(e.to_string()))?;
        tracing::info!(sample_rate = sample_rate_hz, "cpal audio sink opened");

        Ok(Self {
            sample_rate: sample_rate_hz,
            volume,
            buffer,
            _stream: stream,
        })
    }
}

impl AudioSink for CpalSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&mut self, left: &[f32], right: &[f32]) -> Result<(), DeviceError> {
        debug_assert_eq!(left.len(), right.len());
        let mut buf = self.buffer.lock().map_err(|_| DeviceError::Sink("ring buffer poisoned".into()))?;
        for (&l, &r) in left.iter().zip(right.iter()) {
            buf.push_back(l);
            buf.push_back(r);
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        *self.volume.lock().unwrap() = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        *self.volume.lock().unwrap()
    }
}
