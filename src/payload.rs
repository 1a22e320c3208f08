//! JSON wire format for sample batches
//!
//! The collector expects exactly `{"data": [v0,v1,...]}` with every value
//! printed to two decimal places, values separated by a bare comma and no
//! trailing comma.

use core::fmt::Write;

use heapless::String;

/// Maximum encoded payload size in bytes
pub const MAX_PAYLOAD_BYTES: usize = 2048;

/// An encoded batch, ready to be used as a request body
pub type Payload = String<MAX_PAYLOAD_BYTES>;

const PREFIX: &str = "{\"data\": [";
const SUFFIX: &str = "]}";

/// Encode `samples` into `out`
///
/// Fails with `core::fmt::Error` if `out` runs out of room; `out` may hold a
/// partial payload in that case.
pub fn write_samples<W: Write>(out: &mut W, samples: &[f32]) -> core::fmt::Result {
    out.write_str(PREFIX)?;
    for (i, value) in samples.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, "{:.2}", value)?;
    }
    out.write_str(SUFFIX)
}

/// Encode `samples` into a fixed-capacity payload
///
/// Returns `None` when the encoded batch would exceed [`MAX_PAYLOAD_BYTES`].
pub fn encode_samples(samples: &[f32]) -> Option<Payload> {
    let mut payload = Payload::new();
    write_samples(&mut payload, samples).ok()?;
    Some(payload)
}
