//! Median filter shared by the analog-input and ambient-light streams.

/// Median of `values`, sorting them in place.
///
/// Odd length returns the middle element; even length returns the integer
/// average (truncated toward zero) of the two middle elements.  `None` for
/// an empty slice.
pub fn median(values: &mut [i32]) -> Option<i32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        let sum = i64::from(values[mid - 1]) + i64::from(values[mid]);
        Some((sum / 2) as i32)
    } else {
        Some(values[mid])
    }
}

/// Fixed-capacity sample buffer with median readout.
///
/// Supports both fill disciplines: [`push`](Self::push) writes circularly
/// (oldest slot overwritten), [`refill`](Self::refill) overwrites every slot.
/// The median is always taken over all `N` slots, computed on a copy so the
/// ring keeps its write order.
#[derive(Debug, Clone)]
pub struct MedianFilter<const N: usize> {
    samples: [i32; N],
    next: usize,
}

impl<const N: usize> MedianFilter<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "median filter needs at least one slot") };
        Self {
            samples: [0; N],
            next: 0,
        }
    }

    /// Write one sample at the rotating index.
    pub fn push(&mut self, sample: i32) {
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % N;
    }

    /// Overwrite every slot with a fresh sample, in slot order.
    pub fn refill(&mut self, mut sample: impl FnMut() -> i32) {
        for slot in &mut self.samples {
            *slot = sample();
        }
        self.next = 0;
    }

    pub fn median(&self) -> i32 {
        let mut scratch = self.samples;
        // N > 0 is enforced at construction.
        median(&mut scratch).unwrap_or_default()
    }

    pub fn samples(&self) -> &[i32; N] {
        &self.samples
    }
}

impl<const N: usize> Default for MedianFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}
