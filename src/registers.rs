//! MMA8451 register map
//!
//! Only the registers the relay touches are listed. Addresses come from the
//! MMA8451Q datasheet.

macro_rules! registers {
    (
        $enum_name:ident {
            $($(#[$meta:meta])* $name:ident = $val:expr),* $(,)?
        }
    ) => {
        /// MMA8451 register address
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $enum_name {
            $($(#[$meta])* $name = $val),*
        }

        impl $enum_name {
            /// Register name, for bus traces
            pub const fn name(self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }

            /// Register address on the bus
            pub const fn addr(self) -> u8 {
                self as u8
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }
    };
}

registers! {
    Register {
        /// First of six output bytes (X MSB, X LSB, Y MSB, Y LSB, Z MSB, Z LSB)
        OutXMsb = 0x01,
        /// Device identity, reads 0x1A on a genuine MMA8451
        WhoAmI = 0x0D,
        /// Full-scale range selection
        XyzDataCfg = 0x0E,
        /// Portrait/landscape status
        PlStatus = 0x10,
        /// Portrait/landscape configuration
        PlCfg = 0x11,
        /// Portrait/landscape debounce count
        PlCount = 0x12,
        /// Back/front and z-lock trip angles
        PlBfZcomp = 0x13,
        /// System control 1 (ACTIVE bit, data rate)
        CtrlReg1 = 0x2A,
    }
}

/// Expected `WHO_AM_I` value
pub const DEVICE_ID: u8 = 0x1A;

/// Number of output bytes in one X/Y/Z burst
pub const SAMPLE_BYTES: usize = 6;

/// `CTRL_REG1` value that puts the device in standby
pub const CTRL_REG1_STANDBY: u8 = 0x00;

/// `CTRL_REG1` ACTIVE bit
pub const CTRL_REG1_ACTIVE: u8 = 0x01;

/// `PL_CFG` PL_EN bit (enable portrait/landscape detection)
pub const PL_CFG_PL_EN: u8 = 0x40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_names_and_addresses() {
        assert_eq!(Register::OutXMsb.addr(), 0x01);
        assert_eq!(Register::CtrlReg1.addr(), 0x2A);
        assert_eq!(Register::PlBfZcomp.name(), "PlBfZcomp");
        assert_eq!(u8::from(Register::WhoAmI), 0x0D);
    }
}
