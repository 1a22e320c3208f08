//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the sampling loop interacts with
//! hardware and the network. They allow the domain to remain independent
//! of specific implementations.
//!
//! # Hexagonal Architecture
//!
//! In hexagonal architecture, ports define the "holes" in the hexagon where
//! adapters plug in:
//!
//! - **BusPort**: How registers are read and written (async I2C, mock)
//! - **AccelerometerPort**: How calibrated samples are read (MMA8451, mock)
//! - **Connector**: How a byte stream to the collector is opened (TCP, mock)
//! - **ReportPort**: How a full batch is delivered (HTTP POST, mock)

pub mod bus;
pub mod reporter;
pub mod sensor;
pub mod transport;

pub use bus::{BusError, BusPort};
pub use reporter::{NetworkError, ReportPort, StatusCode};
pub use sensor::{AccelerometerPort, SamplerConfig};
pub use transport::{Connector, Endpoint};
