//! Ring-Backed Sample Window

use crate::WindowError;

/// Fixed-capacity history of the most recent samples.
///
/// Pushing beyond capacity overwrites the oldest sample. Snapshots are always
/// `capacity` long, with missing history filled by leading zeros.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    /// Pre-allocated storage
    storage: Box<[f64]>,
    /// Next write position
    head: usize,
    /// Number of valid samples (at most the capacity)
    len: usize,
}

impl SampleWindow {
    /// Create a new window holding up to `capacity` samples
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }

        Ok(Self {
            storage: vec![0.0; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        })
    }

    /// Push a sample into the window (overwrites oldest if full)
    pub fn push(&mut self, sample: f64) {
        let capacity = self.capacity();
        self.storage[self.head] = sample;
        self.head = (self.head + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// Get the number of samples currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Held samples, oldest first
    fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.capacity();
        let start = (self.head + capacity - self.len) % capacity;
        (0..self.len).map(move |i| self.storage[(start + i) % capacity])
    }

    /// Copy the window, oldest first, into `out`, left-padding with zeros
    /// when fewer than `capacity` samples are held
    pub fn copy_padded(&self, out: &mut [f64]) -> Result<(), WindowError> {
        let capacity = self.capacity();
        if out.len() != capacity {
            return Err(WindowError::LengthMismatch {
                expected: capacity,
                actual: out.len(),
            });
        }

        let padding = capacity - self.len;
        out[..padding].fill(0.0);
        for (slot, sample) in out[padding..].iter_mut().zip(self.iter()) {
            *slot = sample;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(window: &SampleWindow) -> Vec<f64> {
        let mut out = vec![f64::NAN; window.capacity()];
        window.copy_padded(&mut out).unwrap();
        out
    }

    #[test]
    fn test_push_and_len() {
        let mut window = SampleWindow::new(10).unwrap();
        assert!(window.is_empty());

        for i in 0..5 {
            window.push(i as f64 * 100.0);
        }

        assert_eq!(window.len(), 5);
        assert_eq!(window.capacity(), 10);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut window = SampleWindow::new(4).unwrap();

        for i in 0..10 {
            window.push(i as f64);
        }

        assert_eq!(window.len(), 4);
        assert_eq!(snapshot(&window), vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_padded_snapshot() {
        let mut window = SampleWindow::new(5).unwrap();
        window.push(1.0);
        window.push(2.0);

        let mut out = [9.0; 5];
        window.copy_padded(&mut out).unwrap();
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_copy_padded_rejects_wrong_length() {
        let window = SampleWindow::new(3).unwrap();
        let mut out = [0.0; 2];
        assert_eq!(
            window.copy_padded(&mut out),
            Err(WindowError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(SampleWindow::new(0).unwrap_err(), WindowError::ZeroCapacity);
    }

    proptest! {
        #[test]
        fn prop_snapshot_matches_slice(
            capacity in 1usize..32,
            samples in proptest::collection::vec(-1000.0f64..1000.0, 0..96),
        ) {
            let mut window = SampleWindow::new(capacity).unwrap();
            for (i, &sample) in samples.iter().enumerate() {
                window.push(sample);

                let start = (i + 1).saturating_sub(capacity);
                let recent = &samples[start..=i];
                let mut expected = vec![0.0; capacity - recent.len()];
                expected.extend_from_slice(recent);

                prop_assert_eq!(snapshot(&window), expected);
            }
        }
    }
}
