//! Adapters - concrete implementations of ports
//!
//! Adapters connect the sampling loop to the outside world by implementing
//! the port traits. Each adapter knows how to work with a specific
//! technology or hardware.
//!
//! # Available Adapters
//!
//! - **i2c_bus**: register access over embedded-hal-async I2C
//! - **mma8451**: MMA8451 accelerometer bring-up and sampling
//! - **http_reporter**: JSON batches as HTTP/1.1 POST requests
//! - **tcp**: embassy-net TCP connections (feature `net`)

pub mod http_reporter;
pub mod i2c_bus;
pub mod mma8451;
#[cfg(feature = "net")]
pub mod tcp;

pub use http_reporter::HttpReporter;
pub use i2c_bus::I2cBus;
pub use mma8451::{Mma8451, Mma8451Config, StartupError};
#[cfg(feature = "net")]
pub use tcp::TcpConnector;
