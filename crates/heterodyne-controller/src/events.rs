//! Observability events (spec.md §6.3): a synchronous observer list rather
//! than an async event bus, since the controller notifies listeners inline
//! during block processing and there is no other task to race with.

use heterodyne_io::DeviceError;

/// Lifecycle state of the source adapter, raised around stream start/stop
/// and on device failure.
#[derive(Debug, Clone)]
pub enum RadioState {
    /// The stream engine has begun issuing reads.
    Starting,
    /// The stream engine has stopped issuing reads.
    Stopping,
    /// Direct sampling has become active for the current tuning.
    DirectSamplingActive,
    /// A device error occurred; the pipeline has stopped and awaits re-open.
    Error(String),
}

/// Raised whenever the stereo flag of the last-emitted audio block differs
/// from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StereoStatus(pub bool);

/// Periodic tick emitted after every `⌊sample_rate / ticks_per_second⌋`
/// accumulated samples, intended to drive a UI refresh.
#[derive(Debug, Clone, Copy)]
pub struct SampleClick;

/// Receives controller lifecycle and status notifications.
pub trait ControllerObserver {
    /// The stereo flag changed.
    fn on_stereo_status(&mut self, _status: StereoStatus) {}
    /// The source adapter's lifecycle state changed.
    fn on_radio_state(&mut self, _state: RadioState) {}
    /// A sample-click tick elapsed.
    fn on_sample_click(&mut self, _click: SampleClick) {}
}

impl From<&DeviceError> for RadioState {
    fn from(err: &DeviceError) -> Self {
        RadioState::Error(err.to_string())
    }
}

/// A bounded-rate sample-click emitter: counts samples and reports whether a
/// tick elapsed this call (spec.md §6.3 "sample-click").
pub struct SampleClicker {
    samples_per_tick: usize,
    accumulated: usize,
}

impl SampleClicker {
    /// `ticks_per_second` of 0 disables ticking entirely.
    pub fn new(sample_rate: u32, ticks_per_second: u32) -> Self {
        let samples_per_tick = if ticks_per_second == 0 {
            0
        } else {
            (sample_rate / ticks_per_second).max(1) as usize
        };
        Self {
            samples_per_tick,
            accumulated: 0,
        }
    }

    /// Accumulate `sample_count` new samples; returns `true` if a tick
    /// boundary was crossed (and resets the accumulator).
    pub fn accumulate(&mut self, sample_count: usize) -> bool {
        if self.samples_per_tick == 0 {
            return false;
        }
        self.accumulated += sample_count;
        if self.accumulated >= self.samples_per_tick {
            self.accumulated -= self.samples_per_tick;
            true
        } else {
            false
        }
    }
}
