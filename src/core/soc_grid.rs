use std::ops::Range;

use crate::{ops::RangeInclusive, quantity::ratios::Percentage};

/// Slack for comparing the computed states of charge against the grid levels.
const EPSILON: f64 = 1e-9;

/// Discretized state-of-charge levels of the [`crate::core::solver::Solver`].
///
/// Levels are spaced by the resolution, starting at the minimum. The last level is always the
/// maximum, so the last step may be shorter.
#[must_use]
pub struct SocGrid {
    levels: Vec<Percentage>,
}

/// Position of an off-grid state of charge between two neighbouring levels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bracket {
    pub lower: usize,
    pub upper: usize,

    /// Weight of the upper level in `0.0..1.0`.
    pub weight: f64,
}

impl SocGrid {
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    #[expect(clippy::cast_precision_loss)]
    pub fn new(bounds: RangeInclusive<Percentage>, resolution: Percentage) -> Self {
        debug_assert!(!bounds.is_empty());
        debug_assert!(resolution.0 > 0.0);
        let n_steps = ((bounds.max - bounds.min).0 / resolution.0 - EPSILON).ceil().max(0.0) as usize;
        let levels = (0..n_steps)
            .map(|step| bounds.min + resolution * step as f64)
            .chain(std::iter::once(bounds.max))
            .collect();
        Self { levels }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, index: usize) -> Percentage {
        self.levels[index]
    }

    /// Index of the level closest to the state of charge, the lower one on ties.
    #[must_use]
    pub fn nearest(&self, state_of_charge: Percentage) -> usize {
        let upper = self.levels.partition_point(|level| *level < state_of_charge);
        if upper == 0 {
            0
        } else if upper == self.levels.len() {
            upper - 1
        } else if (self.levels[upper] - state_of_charge) < (state_of_charge - self.levels[upper - 1])
        {
            upper
        } else {
            upper - 1
        }
    }

    /// Find the levels around the state of charge.
    ///
    /// States outside the grid and states within [`EPSILON`] of a level map onto that level alone.
    pub fn bracket(&self, state_of_charge: Percentage) -> Bracket {
        let upper = self.levels.partition_point(|level| *level <= state_of_charge);
        if upper == 0 {
            return Bracket { lower: 0, upper: 0, weight: 0.0 };
        }
        if upper == self.levels.len() {
            return Bracket { lower: upper - 1, upper: upper - 1, weight: 0.0 };
        }
        let (lower_level, upper_level) = (self.levels[upper - 1], self.levels[upper]);
        let weight = (state_of_charge - lower_level) / (upper_level - lower_level);
        if weight < EPSILON {
            Bracket { lower: upper - 1, upper: upper - 1, weight: 0.0 }
        } else if weight > 1.0 - EPSILON {
            Bracket { lower: upper, upper, weight: 0.0 }
        } else {
            Bracket { lower: upper - 1, upper, weight }
        }
    }

    /// Indices of the levels within the range.
    pub fn within(&self, range: RangeInclusive<Percentage>) -> Range<usize> {
        let start = self.levels.partition_point(|level| level.0 < range.min.0 - EPSILON);
        let end = self.levels.partition_point(|level| level.0 <= range.max.0 + EPSILON);
        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SocGrid {
        SocGrid::new(RangeInclusive::from(Percentage(20.0)..=Percentage(50.0)), Percentage(7.5))
    }

    #[test]
    fn test_levels_ok() {
        let grid = grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.level(0), Percentage(20.0));
        assert_eq!(grid.level(4), Percentage(50.0));
    }

    #[test]
    fn test_uneven_last_step() {
        let grid =
            SocGrid::new(RangeInclusive::from(Percentage(0.0)..=Percentage(10.0)), Percentage(4.0));
        assert_eq!(grid.levels, [Percentage(0.0), Percentage(4.0), Percentage(8.0), Percentage(10.0)]);
    }

    #[test]
    fn test_degenerate_bounds() {
        let grid =
            SocGrid::new(RangeInclusive::from(Percentage(40.0)..=Percentage(40.0)), Percentage(5.0));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.nearest(Percentage(40.0)), 0);
    }

    #[test]
    fn test_nearest_ok() {
        let grid = grid();
        assert_eq!(grid.nearest(Percentage(10.0)), 0);
        assert_eq!(grid.nearest(Percentage(23.0)), 0);
        assert_eq!(grid.nearest(Percentage(25.0)), 1);
        assert_eq!(grid.nearest(Percentage(31.25)), 1);
        assert_eq!(grid.nearest(Percentage(60.0)), 4);
    }

    #[test]
    fn test_bracket_ok() {
        let grid = grid();
        let bracket = grid.bracket(Percentage(23.0));
        assert_eq!((bracket.lower, bracket.upper), (0, 1));
        approx::assert_abs_diff_eq!(bracket.weight, 0.4, epsilon = 1e-12);
        assert_eq!(grid.bracket(Percentage(35.0)), Bracket { lower: 2, upper: 2, weight: 0.0 });
        assert_eq!(grid.bracket(Percentage(99.0)), Bracket { lower: 4, upper: 4, weight: 0.0 });
    }

    #[test]
    fn test_within_ok() {
        let grid = grid();
        assert_eq!(grid.within(RangeInclusive::from(Percentage(27.5)..=Percentage(42.5))), 1..4);
        assert_eq!(grid.within(RangeInclusive::from(Percentage(21.0)..=Percentage(22.0))), 1..1);
    }
}
