//! Full-scale range domain service
//!
//! This module ties the sensor's range register setting to the divisor used
//! when converting raw counts to m/s², so the two always agree.

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.80665;

/// Measurement range of the accelerometer
///
/// Raw words are left-justified, so every divisor is the datasheet's
/// counts-per-g multiplied by 4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScaleRange {
    /// ±2g, 4096 counts/g
    #[default]
    G2,
    /// ±4g, 2048 counts/g
    G4,
    /// ±8g, 1024 counts/g
    G8,
}

impl FullScaleRange {
    /// Value written to `XYZ_DATA_CFG` to select this range
    pub const fn register_value(self) -> u8 {
        match self {
            FullScaleRange::G2 => 0x00,
            FullScaleRange::G4 => 0x01,
            FullScaleRange::G8 => 0x02,
        }
    }

    /// Divisor turning a left-justified 16-bit word into g
    pub const fn divisor(self) -> f32 {
        match self {
            FullScaleRange::G2 => 16384.0,
            FullScaleRange::G4 => 8192.0,
            FullScaleRange::G8 => 4096.0,
        }
    }

    /// Convert one raw axis word to m/s²
    #[inline]
    pub fn to_ms2(self, raw: i16) -> f32 {
        (raw as f32 / self.divisor()) * STANDARD_GRAVITY
    }
}
