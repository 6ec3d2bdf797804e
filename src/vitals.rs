//! Vitals synthesis — randomized-but-bounded physiological readings.
//!
//! The scheduler never touches a process-wide RNG directly: all randomness
//! flows through the `VitalsSource` trait so tests can inject fixed values
//! (same pattern as the mock LLM client on the narrative side).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Which reading of the day is being taken. The evening reading on the
/// surgery day runs slightly febrile — a deliberate policy modelling the
/// early post-operative response, not noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationSlot {
    Morning,
    Evening,
}

/// One synthesized physiological reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// ЧД, breaths per minute
    pub respiratory_rate: u32,
    /// Пульс, beats per minute
    pub heart_rate: u32,
    /// АД, "sys/dia"
    pub blood_pressure: String,
    /// t °C, rounded to 0.1
    pub temperature: f64,
}

impl VitalsSample {
    /// Placeholder for weekend entries: no observation was taken.
    pub fn zeroed() -> Self {
        Self {
            respiratory_rate: 0,
            heart_rate: 0,
            blood_pressure: String::new(),
            temperature: 0.0,
        }
    }
}

/// Source of vitals readings and observation-time jitter.
pub trait VitalsSource {
    /// Fresh independent sample for one clinical observation.
    fn vitals(&mut self, slot: ObservationSlot) -> VitalsSample;

    /// Minute offset (0..=30) appended to the observation hour.
    fn observation_minute(&mut self) -> u32;
}

const SYSTOLIC_VALUES: &[u32] = &[120, 125, 130];
const DIASTOLIC_VALUES: &[u32] = &[80, 85, 90];

/// Temperature added to the evening reading on top of the base offset.
const EVENING_TEMP_SHIFT: f64 = 0.5;

/// Production vitals source backed by `rand`.
pub struct RandomVitals {
    rng: StdRng,
}

impl RandomVitals {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomVitals {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsSource for RandomVitals {
    fn vitals(&mut self, slot: ObservationSlot) -> VitalsSample {
        let sys = *SYSTOLIC_VALUES
            .choose(&mut self.rng)
            .unwrap_or(&SYSTOLIC_VALUES[0]);
        let dia = *DIASTOLIC_VALUES
            .choose(&mut self.rng)
            .unwrap_or(&DIASTOLIC_VALUES[0]);

        // 36.2 – 36.8 baseline, one decimal
        let mut temp = 36.0 + f64::from(self.rng.gen_range(2..=8u32)) / 10.0;
        if slot == ObservationSlot::Evening {
            temp += EVENING_TEMP_SHIFT;
        }

        VitalsSample {
            respiratory_rate: self.rng.gen_range(16..=18),
            heart_rate: self.rng.gen_range(60..=78),
            blood_pressure: format!("{}/{}", sys, dia),
            temperature: (temp * 10.0).round() / 10.0,
        }
    }

    fn observation_minute(&mut self) -> u32 {
        self.rng.gen_range(0..=30)
    }
}

/// Deterministic vitals source for tests — always returns the same sample.
pub struct FixedVitals {
    sample: VitalsSample,
    minute: u32,
}

impl FixedVitals {
    pub fn new(sample: VitalsSample, minute: u32) -> Self {
        Self { sample, minute }
    }

    /// A plausible mid-range fixture.
    pub fn nominal() -> Self {
        Self::new(
            VitalsSample {
                respiratory_rate: 17,
                heart_rate: 70,
                blood_pressure: "120/80".to_string(),
                temperature: 36.6,
            },
            15,
        )
    }
}

impl VitalsSource for FixedVitals {
    fn vitals(&mut self, _slot: ObservationSlot) -> VitalsSample {
        self.sample.clone()
    }

    fn observation_minute(&mut self) -> u32 {
        self.minute
    }
}
