//! Bus port - abstraction for register-addressed peripheral access
//!
//! This trait lets the sensor driver read and write registers without
//! knowing which bus implementation (async I2C, shared bus, mock) carries
//! the bytes. The device address is fixed by the implementation.

/// Error type for bus transactions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge its address or a data byte
    Nack,
    /// Bus busy or arbitration lost
    Busy,
    /// Transaction did not finish within its deadline
    Timeout,
    /// Any other controller error
    Other,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            BusError::Nack => "device did not acknowledge",
            BusError::Busy => "bus busy",
            BusError::Timeout => "bus transaction timed out",
            BusError::Other => "bus error",
        };
        f.write_str(msg)
    }
}

/// Port for register access on one fixed device
///
/// No implementation retries: a failed transaction is returned to the
/// caller as-is.
///
/// # Example Implementation
///
/// ```ignore
/// impl<I: embedded_hal_async::i2c::I2c> BusPort for I2cBus<I> {
///     async fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
///         self.i2c.write(self.address, &[register, value]).await.map_err(classify)
///     }
///
///     async fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), BusError> {
///         self.i2c.write_read(self.address, &[start], buf).await.map_err(classify)
///     }
/// }
/// ```
pub trait BusPort {
    /// Write one register: `[register, value]` in a single transaction
    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> impl core::future::Future<Output = Result<(), BusError>>;

    /// Read `buf.len()` consecutive registers starting at `start`
    ///
    /// The register address is written and the data read back in one
    /// combined transaction with no stop condition in between.
    fn read_registers(
        &mut self,
        start: u8,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), BusError>>;

    /// Read a single register
    fn read_register(
        &mut self,
        register: u8,
    ) -> impl core::future::Future<Output = Result<u8, BusError>> {
        async move {
            let mut buf = [0u8];
            self.read_registers(register, &mut buf).await?;
            Ok(buf[0])
        }
    }
}
