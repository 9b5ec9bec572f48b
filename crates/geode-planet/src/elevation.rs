//! Radial elevation statistics.

use serde::{Deserialize, Serialize};

/// Smallest and largest distance of any surface vertex from the body's center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationRange {
    /// Lowest vertex distance.
    pub min: f32,
    /// Highest vertex distance.
    pub max: f32,
}

impl ElevationRange {
    /// The identity for [`ElevationRange::merge`]: contains nothing.
    pub const EMPTY: ElevationRange = ElevationRange {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Range with explicit bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Grow the range to include `value`.
    #[inline]
    pub fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Union of two ranges. Associative and commutative, so partial ranges
    /// from any split of the vertices reduce to the same result.
    #[must_use]
    pub fn merge(self, other: ElevationRange) -> ElevationRange {
        ElevationRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `true` if no value was ever included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Both bounds multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> ElevationRange {
        ElevationRange {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// `max - min`.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Whether `value` lies within `[min - tolerance, max + tolerance]`.
    pub fn contains(&self, value: f32, tolerance: f32) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_and_empty() {
        let mut range = ElevationRange::EMPTY;
        assert!(range.is_empty());
        range.include(1.2);
        range.include(0.8);
        range.include(1.0);
        assert_eq!(range, ElevationRange::new(0.8, 1.2));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = ElevationRange::new(0.9, 1.0);
        let b = ElevationRange::new(0.95, 1.1);
        let c = ElevationRange::new(0.7, 0.8);
        assert_eq!(a.merge(b).merge(c), c.merge(a.merge(b)));
        assert_eq!(a.merge(ElevationRange::EMPTY), a);
    }

    #[test]
    fn test_scaled() {
        let range = ElevationRange::new(0.9, 1.1).scaled(1000.0);
        assert!((range.min - 900.0).abs() < 1e-3);
        assert!((range.max - 1100.0).abs() < 1e-3);
    }
}
