//! Portrait/landscape status decoding
//!
//! The MMA8451 classifies its own tilt and exposes the result in `PL_STATUS`.
//! The status is recomputed on every poll and never stored.

/// Portrait/landscape state from bits 2:1 of `PL_STATUS`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    PortraitUp,
    PortraitDown,
    LandscapeRight,
    LandscapeLeft,
}

impl Orientation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Orientation::PortraitUp => "Portrait Up",
            Orientation::PortraitDown => "Portrait Down",
            Orientation::LandscapeRight => "Landscape Right",
            Orientation::LandscapeLeft => "Landscape Left",
        }
    }
}

/// Which face of the device points up, from bit 0 of `PL_STATUS`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "Front",
            Side::Back => "Back",
        }
    }
}

/// Raw `PL_STATUS` byte with typed accessors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationStatus(pub u8);

impl OrientationStatus {
    const BAFRO: u8 = 0x01;
    const LAPO_SHIFT: u8 = 1;
    const LAPO_MASK: u8 = 0x03;
    const NEWLC: u8 = 0x80;

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn orientation(&self) -> Orientation {
        match (self.0 >> Self::LAPO_SHIFT) & Self::LAPO_MASK {
            0 => Orientation::PortraitUp,
            1 => Orientation::PortraitDown,
            2 => Orientation::LandscapeRight,
            _ => Orientation::LandscapeLeft,
        }
    }

    pub const fn side(&self) -> Side {
        if self.0 & Self::BAFRO != 0 {
            Side::Back
        } else {
            Side::Front
        }
    }

    /// Whether the orientation changed since `PL_STATUS` was last read
    pub const fn changed(&self) -> bool {
        self.0 & Self::NEWLC != 0
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for OrientationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}", self.orientation().as_str(), self.side().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_four_orientations() {
        assert_eq!(OrientationStatus(0b000).orientation(), Orientation::PortraitUp);
        assert_eq!(OrientationStatus(0b010).orientation(), Orientation::PortraitDown);
        assert_eq!(OrientationStatus(0b100).orientation(), Orientation::LandscapeRight);
        assert_eq!(OrientationStatus(0b110).orientation(), Orientation::LandscapeLeft);
    }

    #[test]
    fn test_side_and_change_flag() {
        let status = OrientationStatus(0x85);
        assert_eq!(status.side(), Side::Back);
        assert_eq!(status.orientation(), Orientation::LandscapeRight);
        assert!(status.changed());
        assert_eq!(OrientationStatus(0x04).side(), Side::Front);
        assert!(!OrientationStatus(0x04).changed());
    }

    #[test]
    fn test_display() {
        let text = std::format!("{}", OrientationStatus(0x07));
        assert_eq!(text, "Landscape Left, Back");
    }
}
