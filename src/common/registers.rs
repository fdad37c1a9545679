// src/common/registers.rs

// HMC5883L register map and configuration bit fields (datasheet rev. E).

/// Fixed 7-bit bus address of the HMC5883L.
pub const ADDRESS: u8 = 0x1E;

/// Register addresses.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    ConfigA = 0x00,
    ConfigB = 0x01,
    Mode = 0x02,
    DataOutXMsb = 0x03,
    DataOutXLsb = 0x04,
    DataOutZMsb = 0x05,
    DataOutZLsb = 0x06,
    DataOutYMsb = 0x07,
    DataOutYLsb = 0x08,
    Status = 0x09,
    IdentA = 0x0A,
    IdentB = 0x0B,
    IdentC = 0x0C,
}

impl Register {
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(r: Register) -> u8 {
        r as u8
    }
}

/// First output register; the device auto-increments through the block.
pub const DATA_START: Register = Register::DataOutXMsb;
/// Size of the output block (three big-endian i16).
pub const DATA_LEN: usize = 6;

// Bit positions inside the configuration registers
pub const CRA_MA_LOC: u8 = 5;
pub const CRA_DO_LOC: u8 = 2;
pub const CRA_MS_LOC: u8 = 0;
pub const CRB_GN_LOC: u8 = 5;
pub const MODE_MD_LOC: u8 = 0;

/// CRA bits 6:5, samples averaged per measurement output.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SamplesAveraged {
    #[default]
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Eight = 0b11,
}

/// CRA bits 4:2, continuous-mode output rate.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DataOutputRate {
    Hz0_75 = 0b000,
    Hz1_5 = 0b001,
    Hz3 = 0b010,
    Hz7_5 = 0b011,
    Hz15 = 0b100,
    Hz30 = 0b101,
    #[default]
    Hz75 = 0b110,
}

/// CRA bits 1:0, measurement flow / self-test bias.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MeasurementMode {
    #[default]
    Normal = 0b00,
    PositiveBias = 0b01,
    NegativeBias = 0b10,
}

/// CRB bits 7:5, sensor field range / gain.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Gain {
    /// ±0.88 Ga
    Lsb1370 = 0b000,
    /// ±1.3 Ga
    Lsb1090 = 0b001,
    /// ±1.9 Ga
    Lsb820 = 0b010,
    /// ±2.5 Ga
    Lsb660 = 0b011,
    /// ±4.0 Ga
    Lsb440 = 0b100,
    /// ±4.7 Ga
    #[default]
    Lsb390 = 0b101,
    /// ±5.6 Ga
    Lsb330 = 0b110,
    /// ±8.1 Ga
    Lsb230 = 0b111,
}

impl Gain {
    /// Counts per gauss for this gain setting.
    pub const fn lsb_per_gauss(self) -> u16 {
        match self {
            Gain::Lsb1370 => 1370,
            Gain::Lsb1090 => 1090,
            Gain::Lsb820 => 820,
            Gain::Lsb660 => 660,
            Gain::Lsb440 => 440,
            Gain::Lsb390 => 390,
            Gain::Lsb330 => 330,
            Gain::Lsb230 => 230,
        }
    }
}

/// MODE bits 1:0, operating mode.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OperatingMode {
    #[default]
    Continuous = 0b00,
    Single = 0b01,
    Idle = 0b10,
}
