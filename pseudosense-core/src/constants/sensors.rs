//! Simulated Sensor Characteristics
//!
//! The pseudo-sensor walks two fixed waveforms at independent rates. The
//! tables below are the waveforms; the ranges are the clamp limits applied
//! after jitter is added.

// ===== REFERENCE WAVEFORMS =====

/// Relative humidity waveform (%RH), one entry per sample.
///
/// Rises in steps of 20 to a 90% peak and falls back in steps of 20,
/// each level held for two samples.
pub const HUMIDITY_REFERENCE: [f64; 18] = [
    0.0, 20.0, 20.0, 40.0, 40.0, 60.0, 60.0, 80.0, 80.0,
    90.0, 70.0, 70.0, 50.0, 50.0, 30.0, 30.0, 10.0, 10.0,
];

/// Temperature waveform (°C), one entry per sample.
///
/// Swings from the -20°C floor to a 90°C peak and back.
pub const TEMPERATURE_REFERENCE: [f64; 16] = [
    -20.0, -10.0, 0.0, 10.0, 30.0, 50.0, 70.0, 80.0,
    90.0, 80.0, 60.0, 40.0, 20.0, 10.0, 0.0, -10.0,
];

/// Number of samples before the (humidity, temperature) index pair repeats.
///
/// lcm(18, 16) = 144.
pub const WAVEFORM_PERIOD: usize = 144;

// ===== CLAMP RANGES =====

/// Lowest humidity the sensor reports (%RH).
pub const HUMIDITY_MIN_PCT: f64 = 0.0;

/// Highest humidity the sensor reports (%RH).
pub const HUMIDITY_MAX_PCT: f64 = 100.0;

/// Lowest temperature the sensor reports (°C).
pub const TEMP_MIN_C: f64 = -20.0;

/// Highest temperature the sensor reports (°C).
pub const TEMP_MAX_C: f64 = 100.0;

// ===== NOISE =====

/// Half-width of the uniform jitter added to each reference value.
///
/// A sample is `reference ± DEFAULT_JITTER` before clamping.
pub const DEFAULT_JITTER: f64 = 1.0;

/// Largest accepted jitter half-width.
///
/// Equal to the widest clamp span (-20..100 °C); more noise than this only
/// pins every sample to a clamp limit.
pub const MAX_JITTER: f64 = TEMP_MAX_C - TEMP_MIN_C;

/// Decimal places kept in generated samples.
pub const SAMPLE_DECIMALS: i32 = 2;
