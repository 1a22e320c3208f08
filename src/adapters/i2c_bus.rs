//! I2C bus adapter
//!
//! This adapter implements the BusPort trait on top of any
//! `embedded_hal_async::i2c::I2c` controller, bounding every transaction
//! with an embassy-time deadline.

use embassy_time::{with_timeout, Duration};
use embedded_hal_async::i2c::{Error, ErrorKind, I2c};

use crate::config::{BUS_READ_TIMEOUT_MS, BUS_WRITE_TIMEOUT_MS, MMA8451_ADDRESS};
use crate::ports::bus::{BusError, BusPort};

/// Register access to one device on an async I2C bus
pub struct I2cBus<I: I2c> {
    i2c: I,
    address: u8,
    write_timeout: Duration,
    read_timeout: Duration,
}

impl<I: I2c> I2cBus<I> {
    /// Create a bus adapter for the device at `address`
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            write_timeout: Duration::from_millis(BUS_WRITE_TIMEOUT_MS),
            read_timeout: Duration::from_millis(BUS_READ_TIMEOUT_MS),
        }
    }

    /// Create a bus adapter for an MMA8451 with SA0 high
    pub fn mma8451(i2c: I) -> Self {
        Self::new(i2c, MMA8451_ADDRESS)
    }

    /// Override the transaction deadlines
    pub fn with_timeouts(mut self, write_timeout: Duration, read_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self.read_timeout = read_timeout;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I {
        self.i2c
    }
}

/// Map a controller error onto the bus error taxonomy
fn classify<E: Error>(err: E) -> BusError {
    match err.kind() {
        ErrorKind::NoAcknowledge(_) => BusError::Nack,
        ErrorKind::Bus | ErrorKind::ArbitrationLoss => BusError::Busy,
        _ => BusError::Other,
    }
}

impl<I: I2c> BusPort for I2cBus<I> {
    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        trace!("i2c {:#x} write {:#x} = {:#x}", self.address, register, value);

        let bytes = [register, value];
        let write = self.i2c.write(self.address, &bytes);
        match with_timeout(self.write_timeout, write).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(BusError::Timeout),
        }
    }

    async fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), BusError> {
        trace!("i2c {:#x} read {} from {:#x}", self.address, buf.len(), start);

        let pointer = [start];
        let read = self.i2c.write_read(self.address, &pointer, buf);
        match with_timeout(self.read_timeout, read).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(BusError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorType, NoAcknowledgeSource, Operation, SevenBitAddress};

    #[derive(Debug)]
    struct FakeError(ErrorKind);

    impl embedded_hal_async::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            self.0
        }
    }

    /// Records writes and answers reads from a fixed byte string
    struct FakeI2c {
        writes: Vec<(u8, Vec<u8>)>,
        reply: Vec<u8>,
        fail_with: Option<ErrorKind>,
    }

    impl ErrorType for FakeI2c {
        type Error = FakeError;
    }

    impl I2c<SevenBitAddress> for FakeI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if let Some(kind) = self.fail_with {
                return Err(FakeError(kind));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                    Operation::Read(buf) => buf.copy_from_slice(&self.reply[..buf.len()]),
                }
            }
            Ok(())
        }
    }

    fn fake(reply: &[u8]) -> FakeI2c {
        FakeI2c {
            writes: Vec::new(),
            reply: reply.to_vec(),
            fail_with: None,
        }
    }

    #[test]
    fn test_write_register_sends_address_then_value() {
        let mut bus = I2cBus::mma8451(fake(&[]));
        block_on(bus.write_register(0x2A, 0x01)).unwrap();
        assert_eq!(bus.release().writes, vec![(0x1D, vec![0x2A, 0x01])]);
    }

    #[test]
    fn test_read_registers_is_combined_write_read() {
        let mut bus = I2cBus::new(fake(&[0x1A, 0xFF]), 0x1C);
        let mut buf = [0u8; 2];
        block_on(bus.read_registers(0x0D, &mut buf)).unwrap();
        assert_eq!(buf, [0x1A, 0xFF]);
        assert_eq!(bus.address(), 0x1C);
        assert_eq!(bus.release().writes, vec![(0x1C, vec![0x0D])]);
    }

    #[test]
    fn test_errors_are_classified() {
        let cases = [
            (ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address), BusError::Nack),
            (ErrorKind::ArbitrationLoss, BusError::Busy),
            (ErrorKind::Bus, BusError::Busy),
            (ErrorKind::Overrun, BusError::Other),
        ];
        for (kind, expected) in cases {
            let mut i2c = fake(&[]);
            i2c.fail_with = Some(kind);
            let mut bus = I2cBus::mma8451(i2c);
            assert_eq!(block_on(bus.write_register(0x2A, 0x00)), Err(expected));
            assert_eq!(block_on(bus.read_register(0x0D)), Err(expected));
        }
    }
}
