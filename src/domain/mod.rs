//! Domain layer - pure logic independent of infrastructure
//!
//! This module contains the sample entities, unit conversion, orientation
//! decoding and the batch buffer. Nothing here touches a bus or a socket.

pub mod buffer;
pub mod orientation;
pub mod range;
pub mod sample;

pub use buffer::{BufferError, SampleBuffer};
pub use orientation::{Orientation, OrientationStatus, Side};
pub use range::{FullScaleRange, STANDARD_GRAVITY};
pub use sample::{PhysicalSample, RawSample};
