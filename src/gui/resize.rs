//! Accumulate-and-flush for resize-handle drags

use eframe::egui::{vec2, Vec2};
use std::time::Instant;

use crate::constants::timing::RESIZE_COALESCE_INTERVAL;

/// Coalesces pointer deltas into whole-point resize requests
///
/// At most one request per `RESIZE_COALESCE_INTERVAL`; sub-point remainders
/// carry over to the next flush.
#[derive(Debug, Default)]
pub struct ResizeCoalescer {
    pending: Vec2,
    last_sent: Option<Instant>,
}

impl ResizeCoalescer {
    /// Add a delta; returns a request if the interval has elapsed
    pub fn push(&mut self, delta: Vec2, now: Instant) -> Option<(i32, i32)> {
        self.pending += delta;
        self.poll(now)
    }

    /// Flush what has accumulated if the interval has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<(i32, i32)> {
        let due = self
            .last_sent
            .is_none_or(|last| now.duration_since(last) >= RESIZE_COALESCE_INTERVAL);
        if !due {
            return None;
        }
        let whole = self.take_whole()?;
        self.last_sent = Some(now);
        Some(whole)
    }

    /// Drag released: send everything left, rounded, and reset
    pub fn finish(&mut self) -> Option<(i32, i32)> {
        let rounded = vec2(self.pending.x.round(), self.pending.y.round());
        self.pending = Vec2::ZERO;
        self.last_sent = None;
        (rounded != Vec2::ZERO).then_some((rounded.x as i32, rounded.y as i32))
    }

    pub fn has_pending(&self) -> bool {
        self.pending != Vec2::ZERO
    }

    fn take_whole(&mut self) -> Option<(i32, i32)> {
        let whole = vec2(self.pending.x.trunc(), self.pending.y.trunc());
        if whole == Vec2::ZERO {
            return None;
        }
        self.pending -= whole;
        Some((whole.x as i32, whole.y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_delta_is_sent_immediately() {
        let mut resize = ResizeCoalescer::default();
        assert_eq!(resize.push(vec2(5.0, -3.0), Instant::now()), Some((5, -3)));
    }

    #[test]
    fn test_deltas_within_interval_are_coalesced() {
        let mut resize = ResizeCoalescer::default();
        let start = Instant::now();
        assert_eq!(resize.push(vec2(1.0, 1.0), start), Some((1, 1)));
        assert_eq!(resize.push(vec2(2.0, 0.0), start + Duration::from_millis(5)), None);
        assert_eq!(resize.push(vec2(3.0, 4.0), start + Duration::from_millis(10)), None);
        assert_eq!(resize.poll(start + Duration::from_millis(15)), None);
        assert_eq!(resize.poll(start + RESIZE_COALESCE_INTERVAL), Some((5, 4)));
        assert!(!resize.has_pending());
    }

    #[test]
    fn test_fractional_remainder_carries_over() {
        let mut resize = ResizeCoalescer::default();
        let start = Instant::now();
        assert_eq!(resize.push(vec2(1.6, 0.4), start), Some((1, 0)));
        let later = start + RESIZE_COALESCE_INTERVAL;
        assert_eq!(resize.push(vec2(0.6, 0.7), later), Some((1, 1)));
        assert!(resize.has_pending());
    }

    #[test]
    fn test_finish_flushes_unsent_delta() {
        let mut resize = ResizeCoalescer::default();
        let start = Instant::now();
        resize.push(vec2(10.0, 10.0), start);
        assert_eq!(resize.push(vec2(-4.0, 2.6), start + Duration::from_millis(1)), None);
        assert_eq!(resize.finish(), Some((-4, 3)));
        assert_eq!(resize.finish(), None);

        // Next gesture starts fresh
        assert_eq!(resize.push(vec2(1.0, 0.0), start + Duration::from_millis(2)), Some((1, 0)));
    }
}
