//! Accelerometer sample domain entities
//!
//! This module defines the raw and calibrated forms of one X/Y/Z reading.
//! It has no knowledge of how readings are fetched or transmitted.

use super::range::FullScaleRange;

/// One raw X/Y/Z reading as it comes off the bus.
///
/// Each axis holds a 14-bit two's-complement value left-justified into the
/// top 14 bits of the 16-bit container, so bit 15 is the sign bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode the six output bytes (X MSB first) of one burst read
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([bytes[0], bytes[1]]),
            y: i16::from_be_bytes([bytes[2], bytes[3]]),
            z: i16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Convert to m/s² using the divisor of the configured range
    pub fn to_physical(&self, range: FullScaleRange) -> PhysicalSample {
        PhysicalSample {
            x: range.to_ms2(self.x),
            y: range.to_ms2(self.y),
            z: range.to_ms2(self.z),
        }
    }
}

/// A calibrated reading: acceleration in m/s² along X, Y and Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PhysicalSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components in buffer order
    pub const fn components(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_be_bytes_keeps_sign_bit() {
        let raw = RawSample::from_be_bytes([0x10, 0x00, 0x00, 0x00, 0xF0, 0x00]);
        assert_eq!(raw, RawSample::new(4096, 0, -4096));
    }

    #[test]
    fn test_known_bytes_convert_to_known_triple() {
        let raw = RawSample::from_be_bytes([0x10, 0x00, 0x00, 0x00, 0xF0, 0x00]);
        let sample = raw.to_physical(FullScaleRange::G2);
        // 4096 / 16384 * 9.80665
        assert!((sample.x - 2.4517).abs() < 1e-3);
        assert_eq!(sample.y, 0.0);
        assert!((sample.z + 2.4517).abs() < 1e-3);
    }

    #[test]
    fn test_one_g_on_z() {
        // 4096 counts/g, shifted left by two bits
        let raw = RawSample::new(0, 0, 0x4000);
        let sample = raw.to_physical(FullScaleRange::G2);
        assert!((sample.z - 9.80665).abs() < 1e-5);
        assert_eq!(sample.components(), [0.0, 0.0, sample.z]);
    }
}
