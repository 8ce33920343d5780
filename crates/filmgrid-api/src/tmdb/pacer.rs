//! Request pacing for the TMDB API.

use std::time::{Duration, Instant};

/// Default spacing between requests (~40 req/s).
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Hands out send slots at least `min_interval` apart.
///
/// Rapid paging can queue several searches at once; each caller
/// reserves the next free slot and sleeps until it. Pacing only
/// delays requests, it never repeats one.
#[derive(Debug)]
pub struct RequestPacer {
    min_interval: Duration,
    /// Earliest instant the next request may go out.
    next_slot: Option<Instant>,
}

impl RequestPacer {
    /// Creates a pacer with the given spacing.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a pacer with the default spacing (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Reserves the next slot as seen at `now` and returns how long the
    /// caller must wait for it.
    fn reserve(&mut self, now: Instant) -> Duration {
        let slot = self.next_slot.map_or(now, |next| next.max(now));
        self.next_slot = Some(slot.checked_add(self.min_interval).unwrap_or(slot));
        slot.saturating_duration_since(now)
    }

    /// Waits for this request's slot.
    pub async fn wait(&mut self) {
        let delay = self.reserve(Instant::now());
        if !delay.is_zero() {
            tracing::trace!(delay_ms = delay.as_millis(), "pacing TMDB request");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    #[test]
    fn test_first_reservation_is_immediate() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(100));
        let now = Instant::now();

        // Act & Assert
        assert_eq!(pacer.reserve(now), Duration::ZERO);
    }

    #[test]
    fn test_back_to_back_reservations_are_spaced() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(100));
        let now = Instant::now();

        // Act
        let first = pacer.reserve(now);
        let second = pacer.reserve(now);
        let third = pacer.reserve(now);

        // Assert
        assert_eq!(first, Duration::ZERO);
        assert_eq!(second, Duration::from_millis(100));
        assert_eq!(third, Duration::from_millis(200));
    }

    #[test]
    fn test_idle_gap_resets_spacing() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(100));
        let start = Instant::now();
        pacer.reserve(start);

        // Act
        let later = start + Duration::from_millis(500);
        let delay = pacer.reserve(later);

        // Assert
        assert_eq!(delay, Duration::ZERO);
    }

    #[test]
    fn test_partial_wait() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(100));
        let start = Instant::now();
        pacer.reserve(start);

        // Act
        let delay = pacer.reserve(start + Duration::from_millis(30));

        // Assert
        assert_eq!(delay, Duration::from_millis(70));
    }

    #[tokio::test]
    async fn test_wait_sleeps_for_second_request() {
        // Arrange
        let mut pacer = RequestPacer::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;

        // Assert
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let pacer = RequestPacer::default_interval();

        // Assert
        assert_eq!(pacer.min_interval, Duration::from_millis(25));
    }
}
