use std::cmp::Reverse;

use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{
        battery::{BatteryParameters, Simulator},
        controller::Controller,
        cost::CostModel,
        error::ensure_parameter,
        scenario::Scenario,
        schedule::Schedule,
        trajectory::Trajectory,
    },
    prelude::*,
    quantity::{currency::Cost, power::Watts},
};

/// Deviations closer than this are considered equal.
const EPSILON: f64 = 1e-9;

/// Maximum deviation from the optimal trajectory, for a controller to match an interval.
///
/// The variant also selects how the deviation is measured.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tolerance {
    /// Absolute difference between the charge rates.
    ChargeRate(Watts),

    /// Absolute difference between the marginal costs.
    Cost(Cost),
}

impl Tolerance {
    /// 10% of the maximum charge rate.
    pub fn default_for(battery: &BatteryParameters) -> Self {
        Self::ChargeRate(battery.max_charge_rate() * 0.1)
    }

    const fn value(self) -> f64 {
        match self {
            Self::ChargeRate(rate) => rate.0,
            Self::Cost(cost) => cost.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MatchStatus {
    Unevaluated,

    /// Index of the matched controller.
    Matched(usize),

    Unmatched,
}

/// Approximates the optimal trajectory with the simple controllers.
#[derive(Builder)]
pub struct Synthesizer<'a, C> {
    scenario: &'a Scenario,
    trajectory: &'a Trajectory,
    battery: &'a BatteryParameters,

    /// Candidate controllers. Earlier candidates win the ties.
    controllers: &'a [C],

    /// Defaults to [`Tolerance::default_for`] the battery.
    tolerance: Option<Tolerance>,

    /// The longest run of unmatched intervals which may be bridged by the neighbours.
    #[builder(default = 4)]
    max_gap_length: usize,

    /// Let a controller keep a single out-of-tolerance interval, when it matches on both sides.
    #[builder(default)]
    fill_individual_gaps: bool,
}

impl<C: Controller> Synthesizer<'_, C> {
    /// Build the schedule.
    ///
    /// Each controller is evaluated independently in each interval, against the state of charge
    /// the optimal trajectory had when entering it. The closest controller wins the interval,
    /// unless it deviates more than the tolerance. Then, the unmatched intervals borrow
    /// the controller of the nearest matched neighbour, and the result gets compressed into runs.
    #[instrument(skip_all)]
    pub fn synthesize(&self) -> Result<Schedule> {
        let tolerance = self.tolerance.unwrap_or_else(|| Tolerance::default_for(self.battery));
        self.validate(tolerance)?;
        info!(
            n_intervals = self.scenario.len(),
            n_controllers = self.controllers.len(),
            ?tolerance,
            self.fill_individual_gaps,
            "synthesizing…",
        );

        let deviations = self.deviations(tolerance);
        let matches = self.matches(&deviations, tolerance);
        let runs = self.runs(&matches);
        let mut statuses = vec![MatchStatus::Unevaluated; self.scenario.len()];
        for (interval_index, status) in statuses.iter_mut().enumerate() {
            *status = self.select(interval_index, &deviations, &matches, &runs, tolerance);
        }
        let n_unmatched =
            statuses.iter().filter(|status| **status == MatchStatus::Unmatched).count();

        self.fill_gaps(&mut statuses)?;
        let assignment = statuses
            .iter()
            .map(|status| match status {
                MatchStatus::Matched(index) => Some(self.controllers[*index].id()),
                MatchStatus::Unevaluated | MatchStatus::Unmatched => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::UnschedulableRegion { start: 0, end: self.scenario.len() })?;
        let schedule = Schedule::compress(self.scenario, assignment)?;
        info!(n_unmatched, n_entries = schedule.entries().len(), "synthesized");
        Ok(schedule)
    }

    fn validate(&self, tolerance: Tolerance) -> Result {
        ensure_parameter!(
            self.trajectory.points.len() == self.scenario.len(),
            "trajectory",
            "must have {} points, got {}",
            self.scenario.len(),
            self.trajectory.points.len()
        );
        ensure_parameter!(!self.controllers.is_empty(), "controllers", "must not be empty");
        ensure_parameter!(
            self.controllers.iter().map(Controller::id).all_unique(),
            "controllers",
            "identifiers must be unique"
        );
        ensure_parameter!(
            tolerance.value().is_finite() && tolerance.value() >= 0.0,
            "tolerance",
            "must not be negative, got {tolerance:?}"
        );
        ensure_parameter!(self.max_gap_length != 0, "max_gap_length", "must be positive");
        Ok(())
    }

    /// Deviation of every controller from the optimal decision, flattened by interval.
    fn deviations(&self, tolerance: Tolerance) -> Vec<f64> {
        let duration = self.scenario.duration();
        let cost_model = CostModel::new(self.battery, duration);
        let mut deviations = Vec::with_capacity(self.scenario.len() * self.controllers.len());
        for (interval_index, (interval, point)) in
            self.scenario.intervals().iter().zip(&self.trajectory.points).enumerate()
        {
            let state_of_charge = self.trajectory.entering_soc(interval_index);
            let simulator = Simulator::new(self.battery, duration, state_of_charge);
            let optimal_cost = cost_model.cost(point.decision, interval);
            deviations.extend(self.controllers.iter().map(|controller| {
                let decision = simulator.clamp(controller.decide(interval, state_of_charge));
                match tolerance {
                    Tolerance::ChargeRate(_) => (decision - point.decision).abs().0,
                    Tolerance::Cost(_) => {
                        (cost_model.cost(decision, interval) - optimal_cost).abs().0
                    }
                }
            }));
        }
        deviations
    }

    /// Whether every controller matches every interval, flattened the same way as the deviations.
    ///
    /// With `fill_individual_gaps`, a single unmatched interval between
    /// two matched ones of the same controller also counts as matched.
    fn matches(&self, deviations: &[f64], tolerance: Tolerance) -> Vec<bool> {
        let mut matches = deviations
            .iter()
            .map(|deviation| *deviation <= tolerance.value() + EPSILON)
            .collect_vec();
        if self.fill_individual_gaps {
            let n_controllers = self.controllers.len();
            let bridged = (n_controllers..matches.len().saturating_sub(n_controllers))
                .filter(|flat_index| {
                    !matches[*flat_index]
                        && matches[flat_index - n_controllers]
                        && matches[flat_index + n_controllers]
                })
                .collect_vec();
            for flat_index in &bridged {
                matches[*flat_index] = true;
            }
            debug!(n_bridged = bridged.len(), "bridged the individual gaps");
        }
        matches
    }

    /// Number of consecutive matched intervals of every controller, starting at every interval.
    fn runs(&self, matches: &[bool]) -> Vec<usize> {
        let n_controllers = self.controllers.len();
        let mut runs = vec![0; matches.len()];
        for flat_index in (0..matches.len()).rev() {
            if matches[flat_index] {
                runs[flat_index] = 1 + runs.get(flat_index + n_controllers).copied().unwrap_or(0);
            }
        }
        runs
    }

    /// Pick the closest controller, the longest running one on ties, then the earliest.
    ///
    /// The bridged controllers compete with the closest one on the run length alone.
    fn select(
        &self,
        interval_index: usize,
        deviations: &[f64],
        matches: &[bool],
        runs: &[usize],
        tolerance: Tolerance,
    ) -> MatchStatus {
        let n_controllers = self.controllers.len();
        let offset = interval_index * n_controllers;
        let row = &deviations[offset..offset + n_controllers];
        let min_deviation = row.iter().copied().fold(f64::INFINITY, f64::min);
        let is_within_tolerance = |index: usize| row[index] <= tolerance.value() + EPSILON;
        (0..n_controllers)
            .filter(|index| {
                if is_within_tolerance(*index) {
                    row[*index] <= min_deviation + EPSILON
                } else {
                    matches[offset + index]
                }
            })
            .max_by_key(|index| (runs[offset + index], Reverse(*index)))
            .map_or(MatchStatus::Unmatched, MatchStatus::Matched)
    }

    /// Assign the unmatched intervals the controller of the nearest matched neighbour,
    /// the preceding one on ties.
    fn fill_gaps(&self, statuses: &mut [MatchStatus]) -> Result {
        let gaps = statuses
            .iter()
            .enumerate()
            .chunk_by(|(_, status)| **status == MatchStatus::Unmatched)
            .into_iter()
            .filter(|(is_unmatched, _)| *is_unmatched)
            .map(|(_, gap)| {
                let indices = gap.map(|(index, _)| index).collect_vec();
                indices[0]..(indices[0] + indices.len())
            })
            .collect_vec();
        let mut n_filled = 0;
        for gap in gaps {
            if gap.len() > self.max_gap_length {
                warn!(gap.start, gap.end, "unmatched run is too long");
                return Err(Error::UnschedulableRegion { start: gap.start, end: gap.end });
            }
            let matched_at = |index: usize| match statuses.get(index) {
                Some(MatchStatus::Matched(controller_index)) => Some((index, *controller_index)),
                _ => None,
            };
            let preceding = gap.start.checked_sub(1).and_then(matched_at);
            let following = matched_at(gap.end);
            for interval_index in gap.clone() {
                let controller_index = match (preceding, following) {
                    (Some((preceding_index, preceding)), Some((following_index, following))) => {
                        if interval_index - preceding_index <= following_index - interval_index {
                            preceding
                        } else {
                            following
                        }
                    }
                    (Some((_, controller_index)), None) | (None, Some((_, controller_index))) => {
                        controller_index
                    }
                    (None, None) => {
                        warn!("no interval matches any controller");
                        return Err(Error::UnschedulableRegion { start: gap.start, end: gap.end });
                    }
                };
                statuses[interval_index] = MatchStatus::Matched(controller_index);
                n_filled += 1;
            }
        }
        debug!(n_filled, "filled the gaps");
        Ok(())
    }
}
