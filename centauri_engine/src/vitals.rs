//! Vitals Module
//!
//! Oxygen and energy meters for the player. Both are bounded resources that
//! can never drop below zero or rise above their maximum.
use std::cmp;
use std::fmt;

/// A bounded resource meter (`0 <= current <= max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    current: u32,
    max: u32,
}
impl Gauge {
    /// Create a gauge filled to `max`.
    pub fn full(max: u32) -> Gauge {
        Gauge { current: max, max }
    }

    /// Create a gauge, clamping `current` into `0..=max`.
    pub fn new(current: u32, max: u32) -> Gauge {
        Gauge {
            current: cmp::min(current, max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Remove up to `amount`. Saturates at zero.
    pub fn drain(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Add up to `amount`, saturating at max. Returns how much was actually added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = cmp::min(self.max, self.current.saturating_add(amount));
        self.current - before
    }

    /// Permanently raise the maximum and add the same amount to the current value.
    pub fn raise_max(&mut self, amount: u32) {
        self.max = self.max.saturating_add(amount);
        self.current = cmp::min(self.max, self.current.saturating_add(amount));
    }
}
impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// The player's life-support readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    pub oxygen: Gauge,
    pub energy: Gauge,
}
impl Vitals {
    /// Fresh vitals with both meters full.
    pub fn new(max_oxygen: u32, max_energy: u32) -> Vitals {
        Vitals {
            oxygen: Gauge::full(max_oxygen),
            energy: Gauge::full(max_energy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_saturates_at_max() {
        let mut gauge = Gauge::full(10);
        gauge.drain(5);
        assert_eq!(gauge.fill(3), 3);
        assert_eq!(gauge.current(), 8);

        assert_eq!(gauge.fill(10), 2);
        assert_eq!(gauge.current(), 10);
        assert_eq!(gauge.fill(1), 0);
    }

    #[test]
    fn drain_saturates_at_zero() {
        let mut gauge = Gauge::new(2, 10);
        gauge.drain(5);
        assert_eq!(gauge.current(), 0);
        assert!(gauge.is_empty());
    }

    #[test]
    fn new_clamps_current_to_max() {
        let gauge = Gauge::new(14, 10);
        assert_eq!(gauge.current(), 10);
        assert!(gauge.is_full());
    }

    #[test]
    fn raise_max_refills_by_same_amount() {
        let mut gauge = Gauge::new(6, 10);
        gauge.raise_max(1);
        assert_eq!(gauge.max(), 11);
        assert_eq!(gauge.current(), 7);
    }

    #[test]
    fn gauge_displays_as_fraction() {
        assert_eq!(Gauge::new(3, 10).to_string(), "3/10");
    }
}
