//! Accelerometer Relay Library
//!
//! This library samples an MMA8451 accelerometer over I2C and relays fixed-size
//! batches of readings to a collector as JSON over HTTP, using a hexagonal
//! architecture so every hardware boundary can be mocked.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - RawSample / PhysicalSample entities                           │
//! │  - FullScaleRange conversion, OrientationStatus decoding         │
//! │  - SampleBuffer fixed-capacity batch                             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - BusPort: register reads/writes                                │
//! │  - AccelerometerPort: read calibrated samples                    │
//! │  - Connector: open a byte stream to the collector                │
//! │  - ReportPort: deliver one batch                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - I2cBus: embedded-hal-async I2C with timeouts                  │
//! │  - Mma8451: sensor bring-up and sampling                         │
//! │  - HttpReporter: HTTP/1.1 POST over any Connector                │
//! │  - TcpConnector: embassy-net TCP (feature `net`)                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Collector`] owns the buffer and drives the sample-collect-report
//! cycle. The [`handoff`] module splits sampling and reporting into two tasks
//! joined by a channel, for boards where a slow POST must not stall sampling.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// Must come first so every module sees the logging macros
mod fmt;

// ============================================================================
// Wire format and configuration (shared by every layer)
// ============================================================================

pub mod config;
pub mod payload;
pub mod registers;

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure conversion and buffering logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

// ============================================================================
// Orchestration
// ============================================================================

pub mod collector;
pub mod handoff;

// Re-export key domain types
pub use domain::{
    BufferError, FullScaleRange, Orientation, OrientationStatus, PhysicalSample, RawSample,
    SampleBuffer, Side,
};

// Re-export key port traits
pub use ports::{
    AccelerometerPort, BusError, BusPort, Connector, Endpoint, NetworkError, ReportPort,
    StatusCode,
};

// Re-export adapters
pub use adapters::{HttpReporter, I2cBus, Mma8451, StartupError};

pub use collector::{bring_up, fill_buffer, CollectStats, Collector, CycleReport};
pub use handoff::{report_batches, report_one_batch, sample_batches, Batch, Sampler};
