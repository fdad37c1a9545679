// src/common/config.rs

use super::registers::{
    DataOutputRate, Gain, MeasurementMode, OperatingMode, Register, SamplesAveraged, CRA_DO_LOC,
    CRA_MA_LOC, CRA_MS_LOC, CRB_GN_LOC, MODE_MD_LOC,
};

/// What the completion handler does with a failed transfer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CompletionPolicy {
    /// Failed transfers leave the cached reading and the staleness timer alone.
    #[default]
    Validated,
    /// Every completion refreshes the staleness timer and re-decodes the
    /// result buffer, even when the transfer failed and the buffer is stale.
    Legacy,
}

/// Driver configuration: the register settings written by `init` plus the
/// policy switches around presence tracking.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MagConfig {
    pub samples: SamplesAveraged,
    pub rate: DataOutputRate,
    pub measurement: MeasurementMode,
    pub gain: Gain,
    pub mode: OperatingMode,
    /// When set, a failed configuration write during `init` leaves the
    /// sensor marked absent. Otherwise the sensor is marked present once it
    /// acknowledged its address, whatever the writes returned.
    pub strict_init: bool,
    pub completion: CompletionPolicy,
}

impl MagConfig {
    pub const fn new() -> Self {
        MagConfig {
            samples: SamplesAveraged::One,
            rate: DataOutputRate::Hz75,
            measurement: MeasurementMode::Normal,
            gain: Gain::Lsb390,
            mode: OperatingMode::Continuous,
            strict_init: false,
            completion: CompletionPolicy::Validated,
        }
    }

    pub const fn with_samples(mut self, samples: SamplesAveraged) -> Self {
        self.samples = samples;
        self
    }

    pub const fn with_rate(mut self, rate: DataOutputRate) -> Self {
        self.rate = rate;
        self
    }

    pub const fn with_measurement(mut self, measurement: MeasurementMode) -> Self {
        self.measurement = measurement;
        self
    }

    pub const fn with_gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub const fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_strict_init(mut self, strict: bool) -> Self {
        self.strict_init = strict;
        self
    }

    pub const fn with_completion(mut self, policy: CompletionPolicy) -> Self {
        self.completion = policy;
        self
    }

    pub const fn config_a(&self) -> u8 {
        (self.samples as u8) << CRA_MA_LOC
            | (self.rate as u8) << CRA_DO_LOC
            | (self.measurement as u8) << CRA_MS_LOC
    }

    pub const fn config_b(&self) -> u8 {
        (self.gain as u8) << CRB_GN_LOC
    }

    pub const fn mode_value(&self) -> u8 {
        (self.mode as u8) << MODE_MD_LOC
    }

    /// The three `[register, value]` writes issued by `init`, in order.
    pub const fn register_writes(&self) -> [[u8; 2]; 3] {
        [
            [Register::ConfigA as u8, self.config_a()],
            [Register::ConfigB as u8, self.config_b()],
            [Register::Mode as u8, self.mode_value()],
        ]
    }
}
