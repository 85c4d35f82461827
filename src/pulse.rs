//! Interrupt-safe pulse accounting shared between ISR and polling contexts.
//!
//! A Hall sensor fires one edge interrupt per shaft revolution (or per
//! magnet, depending on wiring). The interrupt context increments a counter;
//! the polling context periodically drains it to turn elapsed pulses into a
//! rate. [`PulseCounter`] is the single shared resource between the two
//! contexts and the only piece of this crate that needs a synchronization
//! discipline:
//!
//! - the ISR is the sole writer and only ever increments;
//! - the poller is the sole reader-and-resetter and drains via an atomic
//!   swap, never a separate read followed by a store.
//!
//! That swap is what guarantees no pulse is lost or double-counted when an
//! edge lands between the read and the reset.
//!
//! # Example
//!
//! ```rust
//! use rs_motor::PulseCounter;
//!
//! let counter = PulseCounter::new();
//!
//! // The clone goes into the interrupt registration; both handles share
//! // the same accumulator.
//! let isr_handle = counter.clone();
//! isr_handle.record_pulse();
//! isr_handle.record_pulse();
//!
//! assert_eq!(counter.peek(), 2);
//! assert_eq!(counter.take(), 2); // drains
//! assert_eq!(counter.peek(), 0);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use alloc::sync::Arc;

/// Shared pulse accumulator with interrupt-safe increment and drain.
///
/// Cloning is cheap (an `Arc` bump) and every clone refers to the same
/// underlying counter. The application keeps one handle inside the
/// [`MotorController`](crate::MotorController) and passes a clone into the
/// platform's interrupt registration, avoiding any hidden singleton state.
///
/// # ISR Safety
///
/// [`record_pulse`](Self::record_pulse) is a single relaxed atomic add: no
/// allocation, no locks, bounded time. It is safe to call from an interrupt
/// context that can preempt the polling context at any instruction boundary.
#[derive(Clone, Debug, Default)]
pub struct PulseCounter {
    count: Arc<AtomicU32>,
}

impl PulseCounter {
    /// Creates a new counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sensor edge. Call this (and nothing else) from the ISR.
    #[inline]
    pub fn record_pulse(&self) {
        // Relaxed is sufficient: there is one writer (the ISR) and the
        // counter value carries no ordering obligations toward other data.
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically drains the counter, returning the pulses accumulated
    /// since the last drain.
    ///
    /// The read and the reset are one atomic swap, so an edge arriving
    /// concurrently is either included in the returned value or left in the
    /// counter for the next window. It is never dropped.
    #[inline]
    pub fn take(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Returns the current count without draining it.
    ///
    /// Diagnostic only; the rate computation must use [`take`](Self::take).
    #[inline]
    pub fn peek(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = PulseCounter::new();
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.take(), 0);
    }

    #[test]
    fn record_increments_once_per_call() {
        let counter = PulseCounter::new();
        for _ in 0..6 {
            counter.record_pulse();
        }
        assert_eq!(counter.peek(), 6);
    }

    #[test]
    fn take_drains() {
        let counter = PulseCounter::new();
        counter.record_pulse();
        counter.record_pulse();
        counter.record_pulse();

        assert_eq!(counter.take(), 3);
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.take(), 0);
    }

    #[test]
    fn clones_share_the_accumulator() {
        let counter = PulseCounter::new();
        let isr = counter.clone();

        isr.record_pulse();
        counter.record_pulse();

        assert_eq!(counter.peek(), 2);
        assert_eq!(isr.peek(), 2);

        assert_eq!(counter.take(), 2);
        assert_eq!(isr.peek(), 0);
    }

    #[test]
    fn pulses_after_take_accumulate_fresh() {
        let counter = PulseCounter::new();
        counter.record_pulse();
        assert_eq!(counter.take(), 1);

        counter.record_pulse();
        counter.record_pulse();
        assert_eq!(counter.take(), 2);
    }

    #[cfg(feature = "std")]
    #[test]
    fn no_pulses_lost_under_concurrent_drain() {
        use std::thread;

        const WRITERS: usize = 4;
        const PULSES_PER_WRITER: u32 = 10_000;

        let counter = PulseCounter::new();

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let isr = counter.clone();
                thread::spawn(move || {
                    for _ in 0..PULSES_PER_WRITER {
                        isr.record_pulse();
                    }
                })
            })
            .collect();

        // Drain aggressively while writers are running; the swap must never
        // drop an increment that lands mid-drain.
        let mut total: u64 = 0;
        while handles.iter().any(|h| !h.is_finished()) {
            total += u64::from(counter.take());
        }
        for handle in handles {
            handle.join().unwrap();
        }
        total += u64::from(counter.take());

        assert_eq!(total, WRITERS as u64 * u64::from(PULSES_PER_WRITER));
    }
}
