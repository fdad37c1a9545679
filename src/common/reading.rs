// src/common/reading.rs

use super::registers::{Gain, DATA_LEN};

/// Raw value an output register holds after ADC over/underflow, or after a
/// math overflow during bias calculation.
pub const OVERFLOW_SENTINEL: i16 = -4096;

/// One raw three-axis sample, in output-register order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Reading {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Reading {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Reading { x, y, z }
    }

    #[inline]
    pub const fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// True if any axis carries [`OVERFLOW_SENTINEL`].
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.x == OVERFLOW_SENTINEL || self.y == OVERFLOW_SENTINEL || self.z == OVERFLOW_SENTINEL
    }

    /// Scales the raw counts to gauss for the given gain setting.
    pub fn to_gauss(&self, gain: Gain) -> MagneticField {
        let scale = gain.lsb_per_gauss() as f32;
        MagneticField {
            x: self.x as f32 / scale,
            y: self.y as f32 / scale,
            z: self.z as f32 / scale,
        }
    }
}

impl From<Reading> for [i16; 3] {
    fn from(r: Reading) -> Self {
        r.as_array()
    }
}

/// Field strength in gauss.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MagneticField {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Decodes the output block: three big-endian 16-bit pairs, each
/// reinterpreted as signed.
pub fn decode(raw: &[u8; DATA_LEN]) -> Reading {
    Reading {
        x: i16::from_be_bytes([raw[0], raw[1]]),
        y: i16::from_be_bytes([raw[2], raw[3]]),
        z: i16::from_be_bytes([raw[4], raw[5]]),
    }
}
