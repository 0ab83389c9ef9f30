use crate::quantity::{currency::Cost, power::Watts};

/// Outcome of the backward induction for a single `(interval, level)` state.
#[derive(Copy, Clone, Debug)]
pub enum Node {
    Reachable {
        /// Minimal cost from this state till the end of the horizon.
        cost_to_go: Cost,

        /// Decision achieving the cost-to-go.
        decision: Watts,
    },

    /// Every path from this state runs out of feasible decisions.
    Unreachable {
        /// The latest interval at which the paths fail.
        failing_interval: usize,
    },
}

impl Node {
    /// Cost-to-go of a reachable node, or the failing interval of an unreachable one.
    pub const fn cost_to_go(self) -> Result<Cost, usize> {
        match self {
            Self::Reachable { cost_to_go, .. } => Ok(cost_to_go),
            Self::Unreachable { failing_interval } => Err(failing_interval),
        }
    }
}

pub struct SolutionSpace {
    /// State-of-charge dimension size.
    grid_size: usize,

    /// Time dimension size, the boundary row excluded.
    n_intervals: usize,

    /// Flattened 2D array of the nodes, including the boundary row past the horizon.
    flat_matrix: Vec<Node>,
}

impl SolutionSpace {
    pub fn new(n_intervals: usize, grid_size: usize) -> Self {
        let flat_matrix =
            vec![Node::Unreachable { failing_interval: 0 }; (n_intervals + 1) * grid_size];
        Self { grid_size, n_intervals, flat_matrix }
    }

    /// Get the node at the given interval index and state-of-charge level.
    ///
    /// Index `n_intervals` addresses the boundary row.
    pub fn get(&self, interval_index: usize, level: usize) -> Node {
        self.flat_matrix[self.flat_index(interval_index, level)]
    }

    pub fn set(&mut self, interval_index: usize, level: usize, node: Node) {
        let flat_index = self.flat_index(interval_index, level);
        self.flat_matrix[flat_index] = node;
    }

    /// Convert the indices into the respective index in the flattened array.
    #[must_use]
    fn flat_index(&self, interval_index: usize, level: usize) -> usize {
        debug_assert!(
            interval_index <= self.n_intervals,
            "interval index is out of bounds ({interval_index})",
        );
        debug_assert!(level < self.grid_size, "level is out of bounds ({level})");
        interval_index * self.grid_size + level
    }
}
