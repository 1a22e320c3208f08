//! Compile-time board and collector configuration
//!
//! Everything the firmware needs to know about its wiring and its collector
//! lives here. There is no configuration file; rebuild to change a value.

// ============================================================================
// I2C Configuration
// ============================================================================

/// MMA8451 7-bit address with SA0 pulled high
pub const MMA8451_ADDRESS: u8 = 0x1D;

/// Deadline for a single register write
pub const BUS_WRITE_TIMEOUT_MS: u64 = 100;

/// Deadline for a burst read
pub const BUS_READ_TIMEOUT_MS: u64 = 1000;

// ============================================================================
// Sampling Configuration
// ============================================================================

/// Scalars per batch (50 X/Y/Z triples)
pub const BATCH_SCALARS: usize = 150;

/// Delay between bus polls (5 Hz)
pub const SAMPLE_INTERVAL_MS: u32 = 200;

// ============================================================================
// Collector Configuration
// ============================================================================

/// Where full batches are POSTed
pub const COLLECTOR_URL: &str = "http://10.29.199.121:8000/acc_data";

/// Per-connection socket timeout for the embassy-net connector
pub const NETWORK_TIMEOUT_SECS: u64 = 10;
