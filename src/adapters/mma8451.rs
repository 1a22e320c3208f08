//! MMA8451 accelerometer adapter
//!
//! This adapter implements the AccelerometerPort trait for the NXP MMA8451
//! 14-bit three-axis accelerometer on top of any BusPort.

use crate::domain::{FullScaleRange, OrientationStatus, PhysicalSample, RawSample};
use crate::ports::bus::{BusError, BusPort};
use crate::ports::sensor::AccelerometerPort;
use crate::registers::{
    Register, CTRL_REG1_ACTIVE, CTRL_REG1_STANDBY, DEVICE_ID, PL_CFG_PL_EN, SAMPLE_BYTES,
};

/// Fatal bring-up failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// `WHO_AM_I` did not read back the MMA8451 identity
    IdentityMismatch { found: u8 },
    /// A bring-up transaction failed
    Bus(BusError),
}

impl From<BusError> for StartupError {
    fn from(err: BusError) -> Self {
        StartupError::Bus(err)
    }
}

impl core::fmt::Display for StartupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartupError::IdentityMismatch { found } => {
                write!(f, "device id {:#x} not recognized (expected {:#x})", found, DEVICE_ID)
            }
            StartupError::Bus(err) => write!(f, "bring-up failed: {}", err),
        }
    }
}

/// Bring-up settings for the MMA8451
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mma8451Config {
    /// Measurement range; also selects the conversion divisor
    pub range: FullScaleRange,
    /// `PL_CFG` value (orientation detection enable, debounce mode)
    pub pl_cfg: u8,
    /// `PL_COUNT` debounce count
    pub pl_count: u8,
    /// `PL_BF_ZCOMP` back/front and z-lock trip angles
    pub pl_bf_zcomp: u8,
}

impl Default for Mma8451Config {
    fn default() -> Self {
        Self {
            range: FullScaleRange::G2,
            pl_cfg: PL_CFG_PL_EN,
            pl_count: 0x05, // short debounce
            pl_bf_zcomp: 0x44, // standard 45° trip angles
        }
    }
}

impl Mma8451Config {
    /// Same orientation settings with a different range
    pub const fn with_range(mut self, range: FullScaleRange) -> Self {
        self.range = range;
        self
    }
}

/// MMA8451 driver over a register bus
///
/// The adapter is usable for sampling only after [`configure`](Self::configure)
/// has run; [`crate::bring_up`] sequences identity check and configuration.
pub struct Mma8451<B: BusPort> {
    bus: B,
    config: Mma8451Config,
}

impl<B: BusPort> Mma8451<B> {
    /// Create a new adapter with the default ±2g configuration
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, Mma8451Config::default())
    }

    /// Create with a custom configuration
    pub fn with_config(bus: B, config: Mma8451Config) -> Self {
        Self { bus, config }
    }

    pub fn config(&self) -> Mma8451Config {
        self.config
    }

    /// Read `WHO_AM_I`
    pub async fn who_am_i(&mut self) -> Result<u8, BusError> {
        self.bus.read_register(Register::WhoAmI.addr()).await
    }

    /// Check that the device on the bus is an MMA8451
    pub async fn verify_identity(&mut self) -> Result<(), StartupError> {
        let found = self.who_am_i().await?;
        if found != DEVICE_ID {
            return Err(StartupError::IdentityMismatch { found });
        }
        Ok(())
    }

    /// Program orientation detection and range, then go active
    ///
    /// Range and orientation registers are only writable in standby, so the
    /// device is put in standby first and activated last.
    pub async fn configure(&mut self) -> Result<(), StartupError> {
        let config = self.config;
        let sequence = [
            (Register::CtrlReg1, CTRL_REG1_STANDBY),
            (Register::PlCfg, config.pl_cfg),
            (Register::PlCount, config.pl_count),
            (Register::PlBfZcomp, config.pl_bf_zcomp),
            (Register::XyzDataCfg, config.range.register_value()),
            (Register::CtrlReg1, CTRL_REG1_ACTIVE),
        ];

        for (reg, value) in sequence {
            debug!("write_reg {}({:#x}) = {:#x}", reg.name(), reg.addr(), value);
            self.bus.write_register(reg.addr(), value).await?;
        }
        Ok(())
    }

    /// Read the three output words without conversion
    pub async fn read_raw(&mut self) -> Result<RawSample, BusError> {
        let mut bytes = [0u8; SAMPLE_BYTES];
        self.bus.read_registers(Register::OutXMsb.addr(), &mut bytes).await?;
        Ok(RawSample::from_be_bytes(bytes))
    }

    /// Read the portrait/landscape status register
    pub async fn read_orientation(&mut self) -> Result<OrientationStatus, BusError> {
        let raw = self.bus.read_register(Register::PlStatus.addr()).await?;
        Ok(OrientationStatus::new(raw))
    }

    /// Release the underlying bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: BusPort> AccelerometerPort for Mma8451<B> {
    async fn read_sample(&mut self) -> Result<PhysicalSample, BusError> {
        let raw = self.read_raw().await?;
        Ok(raw.to_physical(self.config.range))
    }
}
