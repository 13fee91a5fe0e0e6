//! The six end-to-end scenarios of spec.md §8, built as named `SimulatedTuner`
//! generators so `generate` and `analyze` can run and measure them without
//! duplicating the signal math at each call site.

use heterodyne_io::{Generator, SimulatedTuner};
use heterodyne_modes::{AmParams, CwParams, ModeParams, NbfmParams, SsbParams, WbfmParams};
use heterodyne_registry::SchemeTag;
use std::f32::consts::PI;

/// One of the six scenarios named in spec.md §8, with everything needed to
/// build a tuner and drive a controller against it.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub rf_rate: f32,
    pub centre_frequency_hz: f64,
    pub scheme: SchemeTag,
    pub params: ModeParams,
    /// Expected dominant tone in the demodulated audio, for `analyze` to
    /// check the FFT peak bin against.
    pub expected_tone_hz: Option<f32>,
    generator: fn() -> Generator,
}

impl Scenario {
    /// Build a `SimulatedTuner` tuned to this scenario's centre frequency
    /// and sample rate.
    pub fn tuner(&self) -> SimulatedTuner {
        SimulatedTuner::new((self.generator)(), self.rf_rate as u32, self.centre_frequency_hz)
    }
}

/// All six scenarios, in spec.md §8's order.
pub const ALL: &[Scenario] = &[
    Scenario {
        name: "wbfm-mono",
        description: "WBFM mono pilot-free 1kHz tone at 93.9MHz, 75kHz deviation",
        rf_rate: 1_024_000.0,
        centre_frequency_hz: 93_900_000.0,
        scheme: SchemeTag::Wbfm,
        params: ModeParams::Wbfm(WbfmParams { stereo: false, ..WbfmParams::new() }),
        expected_tone_hz: Some(1000.0),
        generator: || wbfm_mono_tone_generator(1000.0, 75_000.0),
    },
    Scenario {
        name: "wbfm-stereo",
        description: "WBFM stereo composite, L=600Hz R=400Hz, pilot present",
        rf_rate: 1_024_000.0,
        centre_frequency_hz: 93_900_000.0,
        scheme: SchemeTag::Wbfm,
        params: ModeParams::Wbfm(WbfmParams::new()),
        expected_tone_hz: Some(600.0),
        generator: || wbfm_stereo_generator(600.0, 400.0, 75_000.0),
    },
    Scenario {
        name: "nbfm-squelch",
        description: "NBFM silent generator, exercises squelch off->on",
        rf_rate: 192_000.0,
        centre_frequency_hz: 146_520_000.0,
        scheme: SchemeTag::Nbfm,
        params: ModeParams::Nbfm(NbfmParams { squelch: 3.0, ..NbfmParams::new() }),
        expected_tone_hz: None,
        generator: || silence_generator(),
    },
    Scenario {
        name: "am-tone",
        description: "AM 100% modulated 900Hz tone at 810kHz",
        rf_rate: 192_000.0,
        centre_frequency_hz: 810_000.0,
        scheme: SchemeTag::Am,
        params: ModeParams::Am(AmParams::new()),
        expected_tone_hz: Some(900.0),
        generator: || am_tone_generator(900.0, 1.0),
    },
    Scenario {
        name: "usb-tone",
        description: "USB carrier-suppressed 750Hz tone at 14.225MHz",
        rf_rate: 192_000.0,
        centre_frequency_hz: 14_225_000.0,
        scheme: SchemeTag::Usb,
        params: ModeParams::Ssb(SsbParams::new(heterodyne_core::Sideband::Upper)),
        expected_tone_hz: Some(750.0),
        generator: || ssb_tone_generator(750.0, heterodyne_core::Sideband::Upper),
    },
    Scenario {
        name: "lsb-silent",
        description: "Same USB-modulated generator received as LSB: should be quiet",
        rf_rate: 192_000.0,
        centre_frequency_hz: 14_225_000.0,
        scheme: SchemeTag::Lsb,
        params: ModeParams::Ssb(SsbParams::new(heterodyne_core::Sideband::Lower)),
        expected_tone_hz: None,
        generator: || ssb_tone_generator(750.0, heterodyne_core::Sideband::Upper),
    },
    Scenario {
        name: "cw-beat",
        description: "CW unmodulated carrier at offset 0, 600Hz beat tone",
        rf_rate: 192_000.0,
        centre_frequency_hz: 7_030_000.0,
        scheme: SchemeTag::Cw,
        params: ModeParams::Cw(CwParams { tone_hz: 600.0, bandwidth_hz: 50.0, ..CwParams::new() }),
        expected_tone_hz: Some(600.0),
        generator: || carrier_generator(),
    },
];

/// Find a scenario by name, case-insensitively.
pub fn find(name: &str) -> Option<&'static Scenario> {
    ALL.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

fn wbfm_mono_tone_generator(tone_hz: f32, deviation_hz: f32) -> Generator {
    let mut phase = 0.0f32;
    let mut fm_phase = 0.0f32;
    Box::new(move |_centre_hz, sample_rate_hz, count| {
        let mut i = Vec::with_capacity(count);
        let mut q = Vec::with_capacity(count);
        let dt = 1.0 / sample_rate_hz as f32;
        for _ in 0..count {
            let modulator = (2.0 * PI * tone_hz * phase).sin();
            fm_phase += 2.0 * PI * deviation_hz * modulator * dt;
            i.push(fm_phase.cos());
            q.push(fm_phase.sin());
            phase += dt;
        }
        (i, q)
    })
}

fn wbfm_stereo_generator(left_hz: f32, right_hz: f32, deviation_hz: f32) -> Generator {
    const PILOT_HZ: f32 = 19_000.0;
    let mut phase = 0.0f32;
    let mut fm_phase = 0.0f32;
    Box::new(move |_centre_hz, sample_rate_hz, count| {
        let mut i = Vec::with_capacity(count);
        let mut q = Vec::with_capacity(count);
        let dt = 1.0 / sample_rate_hz as f32;
        for _ in 0..count {
            let l = (2.0 * PI * left_hz * phase).sin();
            let r = (2.0 * PI * right_hz * phase).sin();
            let pilot = 0.1 * (2.0 * PI * PILOT_HZ * phase).sin();
            let subcarrier = 0.5 * (l - r) * (2.0 * PI * 2.0 * PILOT_HZ * phase).sin();
            let composite = 0.5 * (l + r) + pilot + subcarrier;
            fm_phase += 2.0 * PI * deviation_hz * composite * dt;
            i.push(fm_phase.cos());
            q.push(fm_phase.sin());
            phase += dt;
        }
        (i, q)
    })
}

fn silence_generator() -> Generator {
    Box::new(move |_centre_hz, _sample_rate_hz, count| (vec![0.0; count], vec![0.0; count]))
}

fn am_tone_generator(tone_hz: f32, modulation_depth: f32) -> Generator {
    let mut phase = 0.0f32;
    Box::new(move |_centre_hz, sample_rate_hz, count| {
        let mut i = Vec::with_capacity(count);
        let mut q = Vec::with_capacity(count);
        let dt = 1.0 / sample_rate_hz as f32;
        for _ in 0..count {
            let envelope = 1.0 + modulation_depth * (2.0 * PI * tone_hz * phase).sin();
            i.push(envelope * 0.5);
            q.push(0.0);
            phase += dt;
        }
        (i, q)
    })
}

fn ssb_tone_generator(tone_hz: f32, sideband: heterodyne_core::Sideband) -> Generator {
    let mut phase = 0.0f32;
    let sign = match sideband {
        heterodyne_core::Sideband::Upper => 1.0,
        heterodyne_core::Sideband::Lower => -1.0,
    };
    Box::new(move |_centre_hz, sample_rate_hz, count| {
        let mut i = Vec::with_capacity(count);
        let mut q = Vec::with_capacity(count);
        let dt = 1.0 / sample_rate_hz as f32;
        for _ in 0..count {
            let arg = 2.0 * PI * tone_hz * phase;
            i.push(0.5 * arg.cos());
            q.push(0.5 * sign * arg.sin());
            phase += dt;
        }
        (i, q)
    })
}

fn carrier_generator() -> Generator {
    Box::new(move |_centre_hz, _sample_rate_hz, count| (vec![0.5; count], vec![0.0; count]))
}
