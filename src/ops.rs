use std::{
    fmt::{Debug, Formatter},
    ops::Sub,
};

use chrono::{DateTime, Local};
use serde::Serialize;

/// Wall-clock span of a scenario interval or a schedule entry.
pub type TimeSpan<Tz = Local> = RangeExclusive<DateTime<Tz>>;

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Serialize)]
pub struct RangeExclusive<T: Copy> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Copy + Sub> RangeExclusive<T> {
    #[must_use]
    pub fn len(self) -> <T as Sub>::Output {
        self.end - self.start
    }
}

impl RangeExclusive<usize> {
    pub fn iter(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RangeInclusive<T: Copy> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + Debug> Debug for RangeInclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..={:?}", self.min, self.max)
    }
}

impl<T: Copy> From<std::ops::RangeInclusive<T>> for RangeInclusive<T> {
    fn from(range: std::ops::RangeInclusive<T>) -> Self {
        Self::from_std(range)
    }
}

impl<T: Copy> RangeInclusive<T> {
    pub const fn from_std(range: std::ops::RangeInclusive<T>) -> Self {
        Self { min: *range.start(), max: *range.end() }
    }
}

impl<T: Copy + PartialOrd> RangeInclusive<T> {
    #[must_use]
    pub fn contains(self, other: T) -> bool {
        (self.min <= other) && (other <= self.max)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min > self.max
    }

    /// Narrow the range down to the intersection with the other one.
    ///
    /// The result may be empty.
    pub fn intersect(self, other: Self) -> Self {
        Self {
            min: if other.min > self.min { other.min } else { self.min },
            max: if other.max < self.max { other.max } else { self.max },
        }
    }

    /// Clamp the value into the range.
    ///
    /// The range must not be empty.
    pub fn clamp(self, value: T) -> T {
        debug_assert!(!self.is_empty());
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_ok() {
        let range = RangeInclusive::from(-10..=10).intersect(RangeInclusive::from(-20..=5));
        assert_eq!(range, RangeInclusive { min: -10, max: 5 });
        assert!(!range.is_empty());
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        assert!(RangeInclusive::from(0..=1).intersect(RangeInclusive::from(2..=3)).is_empty());
    }

    #[test]
    fn test_clamp_ok() {
        let range = RangeInclusive::from(-3..=7);
        assert_eq!(range.clamp(-5), -3);
        assert_eq!(range.clamp(2), 2);
        assert_eq!(range.clamp(9), 7);
    }
}
