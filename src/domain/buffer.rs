//! Fixed-capacity sample batch
//!
//! The buffer is filled one X/Y/Z triple at a time and drained in full once.
//! It never evicts and never flushes a partial batch.

use super::sample::PhysicalSample;

/// Error type for buffer operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Not enough free slots for the value(s) being pushed
    Full,
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BufferError::Full => f.write_str("sample buffer full"),
        }
    }
}

/// An ordered batch of `N` scalar slots.
///
/// Samples are stored as X, Y, Z components in push order. The write cursor
/// only moves forward and never passes `N`; [`drain`](Self::drain) is the only
/// way back to zero.
#[derive(Clone, Debug)]
pub struct SampleBuffer<const N: usize> {
    slots: [f32; N],
    cursor: usize,
}

impl<const N: usize> SampleBuffer<N> {
    const VALID_CAPACITY: () = assert!(
        N > 0 && N % 3 == 0,
        "capacity must be a non-zero multiple of 3"
    );

    pub const fn new() -> Self {
        let () = Self::VALID_CAPACITY;
        Self {
            slots: [0.0; N],
            cursor: 0,
        }
    }

    /// Append one sample as three consecutive slots
    ///
    /// The triple is written entirely or not at all.
    pub fn push(&mut self, sample: PhysicalSample) -> Result<(), BufferError> {
        if self.remaining() < 3 {
            return Err(BufferError::Full);
        }
        self.slots[self.cursor..self.cursor + 3].copy_from_slice(&sample.components());
        self.cursor += 3;
        Ok(())
    }

    /// Append a single scalar
    pub fn push_scalar(&mut self, value: f32) -> Result<(), BufferError> {
        if self.is_full() {
            return Err(BufferError::Full);
        }
        self.slots[self.cursor] = value;
        self.cursor += 1;
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cursor == N
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Number of filled slots (the write cursor)
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        N - self.cursor
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Filled slots in push order
    pub fn as_slice(&self) -> &[f32] {
        &self.slots[..self.cursor]
    }

    /// Take a snapshot of every slot and reset the cursor
    pub fn drain(&mut self) -> [f32; N] {
        self.cursor = 0;
        self.slots
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_150_scalars_fill_the_buffer() {
        let mut buffer = SampleBuffer::<150>::new();
        for i in 0..150 {
            assert!(!buffer.is_full());
            buffer.push_scalar(i as f32).unwrap();
        }
        assert!(buffer.is_full());
        assert_eq!(buffer.push_scalar(150.0), Err(BufferError::Full));
        assert_eq!(buffer.len(), 150);
    }

    #[test]
    fn test_drain_resets_cursor() {
        let mut buffer = SampleBuffer::<6>::new();
        buffer.push(PhysicalSample::new(1.0, 2.0, 3.0)).unwrap();
        buffer.push(PhysicalSample::new(4.0, 5.0, 6.0)).unwrap();
        assert!(buffer.is_full());

        let batch = buffer.drain();
        assert_eq!(batch, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(!buffer.is_full());
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_triple_is_never_split() {
        let mut buffer = SampleBuffer::<6>::new();
        buffer.push_scalar(0.5).unwrap();
        buffer.push(PhysicalSample::new(1.0, 2.0, 3.0)).unwrap();
        // Two slots left: a whole triple no longer fits
        assert_eq!(buffer.push(PhysicalSample::new(4.0, 5.0, 6.0)), Err(BufferError::Full));
        assert_eq!(buffer.as_slice(), &[0.5, 1.0, 2.0, 3.0]);
        assert_eq!(buffer.remaining(), 2);
    }

    #[test]
    fn test_push_order_is_x_y_z() {
        let mut buffer = SampleBuffer::<3>::default();
        buffer.push(PhysicalSample::new(-1.5, 0.25, 9.8)).unwrap();
        assert_eq!(buffer.as_slice(), &[-1.5, 0.25, 9.8]);
        assert_eq!(buffer.capacity(), 3);
    }
}
