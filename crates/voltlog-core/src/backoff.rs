use std::time::Duration;

/// Sleep multiplier that grows while the converter stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    factor: u32,
    max_factor: u32,
    base: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), 10)
    }
}

impl Backoff {
    pub fn new(base: Duration, max_factor: u32) -> Self {
        Self {
            factor: 1,
            max_factor: max_factor.max(1),
            base,
        }
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    pub fn reset(&mut self) {
        self.factor = 1;
    }

    pub fn increase(&mut self) {
        if self.factor < self.max_factor {
            self.factor += 1;
        }
    }

    /// Time to wait before the next cycle. Saturates instead of overflowing.
    pub fn delay(&self) -> Duration {
        self.base.saturating_mul(self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        let b = Backoff::default();
        assert_eq!(b.factor(), 1);
        assert_eq!(b.delay(), Duration::from_secs(60));
    }

    #[test]
    fn grows_to_cap() {
        let mut b = Backoff::default();
        for n in 1..=15u32 {
            b.increase();
            assert_eq!(b.factor(), (n + 1).min(10));
            assert_eq!(b.delay(), Duration::from_secs(60 * u64::from(b.factor())));
        }
        assert_eq!(b.delay(), Duration::from_secs(600));
    }

    #[test]
    fn reset_is_immediate() {
        let mut b = Backoff::default();
        for _ in 0..4 {
            b.increase();
        }
        assert_eq!(b.factor(), 5);
        b.reset();
        assert_eq!(b.factor(), 1);
        assert_eq!(b.delay(), Duration::from_secs(60));
    }

    #[test]
    fn huge_base_saturates() {
        let mut b = Backoff::new(Duration::from_secs(u64::MAX), 10);
        b.increase();
        assert_eq!(b.factor(), 2);
        assert_eq!(b.delay(), Duration::MAX);
    }

    #[test]
    fn zero_cap_still_sleeps_once() {
        let mut b = Backoff::new(Duration::from_secs(1), 0);
        b.increase();
        assert_eq!(b.factor(), 1);
    }
}
