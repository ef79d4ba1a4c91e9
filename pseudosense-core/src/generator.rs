//! Pseudo-Sensor Waveform Generator
//!
//! ## Overview
//!
//! The simulated sensor has no physics behind it. Each reading is a lookup
//! into one of two fixed reference waveforms plus a little uniform noise:
//!
//! ```text
//! humidity    = HUMIDITY_REFERENCE[h_index]    + U(-j, j)   clamped to [0, 100]
//! temperature = TEMPERATURE_REFERENCE[t_index] + U(-j, j)   clamped to [-20, 100]
//! ```
//!
//! Both indices advance by one per sample and wrap independently. The
//! humidity table has 18 entries and the temperature table 16, so the pair of
//! indices repeats every lcm(18, 16) = 144 samples.
//!
//! ## Determinism
//!
//! The random source is injected. Two generators built with the same seed
//! produce identical sequences, and a jitter of `0.0` reproduces the
//! reference tables exactly.
//!
//! ```rust
//! use pseudosense_core::generator::WaveformGenerator;
//!
//! let mut a = WaveformGenerator::seeded(7);
//! let mut b = WaveformGenerator::seeded(7);
//! assert_eq!(a.next_sample(), b.next_sample());
//!
//! let mut exact = WaveformGenerator::seeded(0).with_jitter(0.0);
//! let first = exact.next_sample();
//! assert_eq!((first.humidity, first.temperature), (0.0, -20.0));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::sensors::{
    DEFAULT_JITTER, HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, HUMIDITY_REFERENCE, MAX_JITTER,
    SAMPLE_DECIMALS, TEMPERATURE_REFERENCE, TEMP_MAX_C, TEMP_MIN_C,
};
use crate::reading::Sample;

/// Cursor into the reference waveforms plus the last emitted values
///
/// Index invariants: `h_index < HUMIDITY_REFERENCE.len()` and
/// `t_index < TEMPERATURE_REFERENCE.len()` at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorState {
    h_index: usize,
    t_index: usize,
    last_humidity: f64,
    last_temperature: f64,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            h_index: 0,
            t_index: 0,
            last_humidity: HUMIDITY_REFERENCE[0],
            last_temperature: TEMPERATURE_REFERENCE[0],
        }
    }
}

impl GeneratorState {
    /// State positioned at the start of both waveforms
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next humidity reference value
    pub fn h_index(&self) -> usize {
        self.h_index
    }

    /// Index of the next temperature reference value
    pub fn t_index(&self) -> usize {
        self.t_index
    }

    /// Most recently emitted humidity (%RH)
    pub fn last_humidity(&self) -> f64 {
        self.last_humidity
    }

    /// Most recently emitted temperature (°C)
    pub fn last_temperature(&self) -> f64 {
        self.last_temperature
    }

    /// Produce one sample and advance both indices
    ///
    /// `jitter` is the half-width of the uniform noise; zero skips the
    /// random source entirely.
    pub fn next_with<R: Rng>(&mut self, rng: &mut R, jitter: f64) -> Sample {
        let humidity = HUMIDITY_REFERENCE[self.h_index] + noise(rng, jitter);
        let temperature = TEMPERATURE_REFERENCE[self.t_index] + noise(rng, jitter);

        let humidity = round_to(humidity.clamp(HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT));
        let temperature = round_to(temperature.clamp(TEMP_MIN_C, TEMP_MAX_C));

        self.h_index = (self.h_index + 1) % HUMIDITY_REFERENCE.len();
        self.t_index = (self.t_index + 1) % TEMPERATURE_REFERENCE.len();
        self.last_humidity = humidity;
        self.last_temperature = temperature;

        Sample { humidity, temperature }
    }
}

fn noise<R: Rng>(rng: &mut R, jitter: f64) -> f64 {
    if jitter > 0.0 {
        let jitter = jitter.min(MAX_JITTER);
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    }
}

fn round_to(value: f64) -> f64 {
    let scale = 10f64.powi(SAMPLE_DECIMALS);
    (value * scale).round() / scale
}

/// Pseudo-sensor producing (humidity, temperature) samples
pub struct WaveformGenerator<R = StdRng> {
    state: GeneratorState,
    rng: R,
    jitter: f64,
}

impl WaveformGenerator<StdRng> {
    /// Generator with a reproducible random source
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> WaveformGenerator<R> {
    /// Generator drawing noise from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GeneratorState::new(),
            rng,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Override the noise half-width
    ///
    /// Negative values are treated as their magnitude and the result is
    /// capped at [`MAX_JITTER`]. NaN disables noise.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = if jitter.is_nan() {
            0.0
        } else {
            jitter.abs().min(MAX_JITTER)
        };
        self
    }

    /// Produce the next sample, advancing the waveform cursor
    pub fn next_sample(&mut self) -> Sample {
        self.state.next_with(&mut self.rng, self.jitter)
    }

    /// Current cursor and last values
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Noise half-width in use
    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}

impl<R: Rng> Iterator for WaveformGenerator<R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.next_sample())
    }
}
