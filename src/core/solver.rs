use std::time::Instant;

use bon::Builder;

use crate::{
    core::{
        battery::{BatteryParameters, Simulator},
        cost::CostModel,
        error::ensure_parameter,
        interval::Interval,
        scenario::Scenario,
        soc_grid::SocGrid,
        solution_space::{Node, SolutionSpace},
        trajectory::{Recorder, Trajectory},
    },
    ops::RangeInclusive,
    prelude::*,
    quantity::{Zero, currency::Cost, power::Watts, ratios::Percentage},
};

/// Costs closer than this are considered equal.
const COST_EPSILON: f64 = 1e-9;

/// Score added to every decision that moves the battery, when minimizing the activity.
const ACTIVITY_PENALTY: Cost = Cost(0.001);

/// Score added to landing at the minimum state of charge, when charging early.
/// Scales down linearly to zero at the maximum.
const EARLY_CHARGE_PENALTY: Cost = Cost(0.002);

/// How the cost-to-go is looked up when a decision lands between the grid levels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Snapping {
    /// Only consider the decisions which land exactly on a level.
    #[default]
    Nearest,

    /// Also consider the rate limits, interpolating the cost-to-go linearly between
    /// the neighbouring levels.
    Interpolate,
}

/// Constraint on the state of charge at the end of the horizon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TerminalCondition {
    /// The battery may end up anywhere within its bounds.
    Free,

    /// The battery must end up at least at the grid level of the initial state of charge.
    #[default]
    AtLeastInitial,

    /// The battery must end up at least at the given state of charge.
    AtLeast(Percentage),
}

#[derive(Builder)]
pub struct Solver<'a> {
    scenario: &'a Scenario,
    battery: &'a BatteryParameters,
    initial_soc: Percentage,

    /// State-of-charge grid step.
    grid_resolution: Percentage,

    #[builder(default)]
    snapping: Snapping,

    #[builder(default)]
    terminal_condition: TerminalCondition,

    /// Maximum power the household may draw from the grid, battery included.
    grid_import_limit: Option<Watts>,

    /// Prefer idling over a negligible gain.
    #[builder(default)]
    minimize_activity: bool,

    /// Prefer charging earlier over charging later at the same cost.
    #[builder(default)]
    prioritize_early_charge: bool,
}

impl Solver<'_> {
    /// Find the minimal-cost battery trajectory.
    ///
    /// Works backwards from the end of the horizon, computing the minimal cost-to-go at each
    /// `(interval, state of charge)` state. Cost is the money lost or gained on the grid due to
    /// the battery, plus the battery wear.
    ///
    /// The [DP][1] state space:
    ///
    /// - Time dimension: each scenario interval, plus the boundary past the horizon
    /// - State-of-charge dimension: levels spaced by the grid resolution
    ///
    /// Then, the battery is simulated forwards from the actual initial state of charge, looking up
    /// the decisions at the nearest grid level.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Dynamic_programming
    #[instrument(skip_all)]
    pub fn solve(&self) -> Result<Trajectory> {
        self.validate()?;
        let start_instant = Instant::now();

        let grid = self.grid();
        let n_intervals = self.scenario.len();
        info!(
            grid_size = grid.len(),
            n_intervals,
            ?self.snapping,
            ?self.terminal_condition,
            self.minimize_activity,
            self.prioritize_early_charge,
            "optimizing…",
        );

        let mut solutions = SolutionSpace::new(n_intervals, grid.len());
        let min_terminal_soc = match self.terminal_condition {
            TerminalCondition::Free => None,
            TerminalCondition::AtLeastInitial => {
                Some(grid.level(grid.bracket(self.initial_soc).lower))
            }
            TerminalCondition::AtLeast(state_of_charge) => Some(state_of_charge),
        };
        for level in 0..grid.len() {
            let node = match min_terminal_soc {
                Some(min_soc) if grid.level(level).0 < min_soc.0 - 1e-9 => {
                    Node::Unreachable { failing_interval: n_intervals - 1 }
                }
                _ => Node::Reachable { cost_to_go: Cost::ZERO, decision: Watts::ZERO },
            };
            solutions.set(n_intervals, level, node);
        }

        // Going backwards:
        let cost_model = CostModel::new(self.battery, self.scenario.duration());
        for (interval_index, interval) in self.scenario.intervals().iter().enumerate().rev() {
            for level in 0..grid.len() {
                let node = self.optimize_state(
                    &grid,
                    &solutions,
                    &cost_model,
                    interval_index,
                    interval,
                    level,
                );
                solutions.set(interval_index, level, node);
            }
        }

        let trajectory = self.backtrack(&grid, &solutions)?;
        info!(
            elapsed = ?start_instant.elapsed(),
            total_cost = ?trajectory.total_cost(),
            final_soc = ?trajectory.entering_soc(n_intervals),
            "optimized",
        );
        Ok(trajectory)
    }

    /// Total bill of the scenario with the battery idle.
    pub fn baseline(&self) -> Cost {
        let cost_model = CostModel::new(self.battery, self.scenario.duration());
        self.scenario.intervals().iter().map(|interval| cost_model.baseline(interval)).sum()
    }

    /// Number of `(interval, state of charge)` states the solve visits.
    #[must_use]
    pub fn state_space_size(&self) -> usize {
        self.scenario.len() * self.grid().len()
    }

    fn validate(&self) -> Result {
        ensure_parameter!(
            self.grid_resolution.is_finite() && self.grid_resolution > Percentage::ZERO,
            "grid_resolution",
            "must be positive, got {}",
            self.grid_resolution
        );
        ensure_parameter!(
            self.initial_soc.is_finite() && self.battery.soc_bounds().contains(self.initial_soc),
            "initial_soc",
            "must be within {:?}, got {}",
            self.battery.soc_bounds(),
            self.initial_soc
        );
        if let Some(limit) = self.grid_import_limit {
            ensure_parameter!(
                limit.is_finite() && limit >= Watts::ZERO,
                "grid_import_limit",
                "must not be negative, got {limit}"
            );
        }
        if let TerminalCondition::AtLeast(state_of_charge) = self.terminal_condition {
            ensure_parameter!(
                state_of_charge.is_finite() && self.battery.soc_bounds().contains(state_of_charge),
                "terminal_condition",
                "final state of charge must be within {:?}, got {state_of_charge}",
                self.battery.soc_bounds()
            );
        }
        Ok(())
    }

    fn grid(&self) -> SocGrid {
        SocGrid::new(self.battery.soc_bounds(), self.grid_resolution)
    }

    /// Decisions allowed at the state of charge within the interval.
    fn feasible_range(&self, interval: &Interval, state_of_charge: Percentage) -> RangeInclusive<Watts> {
        let range =
            Simulator::new(self.battery, self.scenario.duration(), state_of_charge).feasible_range();
        match self.grid_import_limit {
            Some(limit) => RangeInclusive {
                min: range.min,
                max: range.max.min(self.battery.decision_for_grid_power(limit - interval.net_load())),
            },
            None => range,
        }
    }

    /// Pick the best decision for the state, given the solutions of the next interval.
    fn optimize_state(
        &self,
        grid: &SocGrid,
        solutions: &SolutionSpace,
        cost_model: &CostModel,
        interval_index: usize,
        interval: &Interval,
        level: usize,
    ) -> Node {
        let state_of_charge = grid.level(level);
        let range = self.feasible_range(interval, state_of_charge);
        if range.is_empty() {
            return Node::Unreachable { failing_interval: interval_index };
        }
        let duration = self.scenario.duration();
        let reach = RangeInclusive {
            min: state_of_charge + self.battery.soc_delta(range.min, duration),
            max: state_of_charge + self.battery.soc_delta(range.max, duration),
        };

        // Grid-aligned transitions first:
        let aligned = grid.within(reach).map(|next_level| {
            let next_soc = grid.level(next_level);
            let decision = self.battery.rate_for(next_soc - state_of_charge, duration);
            (
                range.clamp(decision),
                next_soc,
                solutions.get(interval_index + 1, next_level).cost_to_go(),
            )
        });

        // The rate limits may land off the grid. The nearest level of such a landing is already
        // an aligned transition, so only the interpolation values them:
        let boundaries = [range.min, range.max]
            .into_iter()
            .filter(|_| self.snapping == Snapping::Interpolate)
            .map(|decision| {
                let next_soc = self
                    .battery
                    .soc_bounds()
                    .clamp(state_of_charge + self.battery.soc_delta(decision, duration));
                (
                    decision,
                    next_soc,
                    Self::interpolated_cost_to_go(grid, solutions, interval_index + 1, next_soc),
                )
            });

        let mut best: Option<(Cost, Watts)> = None;
        let mut failing_interval = interval_index;
        for (decision, next_soc, cost_to_go) in aligned.chain(boundaries) {
            match cost_to_go {
                Ok(cost_to_go) => {
                    let total_cost = cost_model.cost(decision, interval)
                        + self.penalty(decision, next_soc)
                        + cost_to_go;
                    if is_better(total_cost, decision, best) {
                        best = Some((total_cost, decision));
                    }
                }
                Err(next_failing_interval) => {
                    failing_interval = failing_interval.max(next_failing_interval);
                }
            }
        }
        match best {
            Some((cost_to_go, decision)) => Node::Reachable { cost_to_go, decision },
            None => Node::Unreachable { failing_interval },
        }
    }

    /// Interpolate the cost-to-go of an arbitrary state of charge.
    ///
    /// # Returns
    ///
    /// - [`Ok`] cost-to-go, if both neighbouring levels are reachable.
    /// - [`Err`] failing interval, if either is not.
    fn interpolated_cost_to_go(
        grid: &SocGrid,
        solutions: &SolutionSpace,
        interval_index: usize,
        state_of_charge: Percentage,
    ) -> Result<Cost, usize> {
        let bracket = grid.bracket(state_of_charge);
        let lower = solutions.get(interval_index, bracket.lower).cost_to_go();
        if bracket.lower == bracket.upper {
            return lower;
        }
        let upper = solutions.get(interval_index, bracket.upper).cost_to_go();
        match (lower, upper) {
            (Ok(lower), Ok(upper)) => Ok(lower * (1.0 - bracket.weight) + upper * bracket.weight),
            (Err(failing_interval), Ok(_)) | (Ok(_), Err(failing_interval)) => {
                Err(failing_interval)
            }
            (Err(lower), Err(upper)) => Err(lower.max(upper)),
        }
    }

    /// Tie-shaping score of a transition. It steers the choice but never enters the trajectory
    /// costs.
    fn penalty(&self, decision: Watts, next_soc: Percentage) -> Cost {
        let mut penalty = Cost::ZERO;
        if self.minimize_activity && decision.abs().0 > COST_EPSILON {
            penalty += ACTIVITY_PENALTY;
        }
        if self.prioritize_early_charge {
            let bounds = self.battery.soc_bounds();
            let span = bounds.max - bounds.min;
            if span > Percentage::ZERO {
                penalty += EARLY_CHARGE_PENALTY * ((bounds.max - next_soc) / span);
            }
        }
        penalty
    }

    /// Simulate the battery following the optimal decisions.
    fn backtrack(&self, grid: &SocGrid, solutions: &SolutionSpace) -> Result<Trajectory> {
        let mut recorder = Recorder::new(
            self.battery,
            self.scenario.duration(),
            self.initial_soc,
            self.scenario.len(),
        );
        for (interval_index, interval) in self.scenario.intervals().iter().enumerate() {
            let state_of_charge = recorder.simulator().state_of_charge;
            let decision = match solutions.get(interval_index, grid.nearest(state_of_charge)) {
                Node::Reachable { decision, .. } => decision,
                Node::Unreachable { failing_interval } => {
                    return Err(self.infeasible(failing_interval));
                }
            };

            // The actual state of charge may be off the grid:
            let range = self.feasible_range(interval, state_of_charge);
            if range.is_empty() {
                return Err(self.infeasible(interval_index));
            }
            recorder.record(interval, range.clamp(decision));
        }
        Ok(recorder.finish())
    }

    fn infeasible(&self, interval_index: usize) -> Error {
        let timestamp = self.scenario.intervals()[interval_index].timestamp;
        warn!(interval_index, %timestamp, "no feasible trajectory");
        Error::InfeasibleScenario { interval: interval_index, timestamp }
    }
}

/// Prefer the lower cost, and the decision closer to zero on equal costs.
fn is_better(total_cost: Cost, decision: Watts, best: Option<(Cost, Watts)>) -> bool {
    match best {
        None => true,
        Some((best_cost, best_decision)) => {
            let difference = (total_cost - best_cost).0;
            difference < -COST_EPSILON
                || (difference.abs() <= COST_EPSILON && decision.abs() < best_decision.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::scenario::tests::hourly,
        quantity::{energy::WattHours, price::KilowattHourPrice},
    };

    fn ideal_battery() -> BatteryParameters {
        BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(2000.0))
            .max_discharge_rate(Watts(2000.0))
            .min_soc(Percentage(20.0))
            .max_soc(Percentage(100.0))
            .build()
            .unwrap()
    }

    fn assert_decisions(trajectory: &Trajectory, expected: &[f64]) {
        assert_eq!(trajectory.points.len(), expected.len());
        for (actual, expected) in trajectory.decisions().zip(expected) {
            assert_abs_diff_eq!(actual.0, *expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_price_dip_ok() {
        let battery = ideal_battery();
        let scenario =
            hourly(&[(0.0, 1000.0, 0.30, 0.0), (0.0, 1000.0, 0.05, 0.0), (0.0, 1000.0, 0.30, 0.0)]);
        let solver = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(50.0))
            .grid_resolution(Percentage(5.0))
            .build();
        let trajectory = solver.solve().unwrap();

        assert_decisions(&trajectory, &[-1000.0, 2000.0, -1000.0]);
        assert_abs_diff_eq!(trajectory.total_cost().0, -0.50, epsilon = 1e-9);
        assert_abs_diff_eq!(solver.baseline().0, 0.65, epsilon = 1e-9);
        assert!(trajectory.summary().bill < solver.baseline());
        assert_abs_diff_eq!(trajectory.entering_soc(3).0, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_price_dip_interpolated_ok() {
        let battery = ideal_battery();
        let scenario =
            hourly(&[(0.0, 1000.0, 0.30, 0.0), (0.0, 1000.0, 0.05, 0.0), (0.0, 1000.0, 0.30, 0.0)]);
        let trajectory = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(50.0))
            .grid_resolution(Percentage(5.0))
            .snapping(Snapping::Interpolate)
            .build()
            .solve()
            .unwrap();
        assert_decisions(&trajectory, &[-1000.0, 2000.0, -1000.0]);
    }

    #[test]
    fn test_flat_import_tariff_is_idle() {
        let battery = BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(3000.0))
            .max_discharge_rate(Watts(3000.0))
            .min_soc(Percentage(10.0))
            .max_soc(Percentage(90.0))
            .charge_efficiency(Percentage(95.0))
            .discharge_efficiency(Percentage(95.0))
            .charge_degradation(KilowattHourPrice(0.01))
            .discharge_degradation(KilowattHourPrice(0.01))
            .build()
            .unwrap();
        let scenario = hourly(&[
            (0.0, 800.0, 0.25, 0.05),
            (0.0, 1200.0, 0.25, 0.02),
            (0.0, 300.0, 0.25, 0.10),
            (0.0, 2000.0, 0.25, 0.05),
            (0.0, 500.0, 0.25, 0.0),
            (0.0, 900.0, 0.25, 0.05),
        ]);
        for snapping in [Snapping::Nearest, Snapping::Interpolate] {
            let trajectory = Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(50.0))
                .grid_resolution(Percentage(1.0))
                .snapping(snapping)
                .build()
                .solve()
                .unwrap();
            assert_decisions(&trajectory, &[0.0; 6]);
            assert_eq!(trajectory.total_cost(), Cost::ZERO);
            assert!(trajectory.entering_soc(6) >= Percentage(50.0));
        }
    }

    /// The rate limits land between the levels here.
    #[test]
    fn test_off_grid_rate_limits_under_flat_tariff_are_idle() {
        let battery = BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(1400.0))
            .max_discharge_rate(Watts(1400.0))
            .build()
            .unwrap();
        let scenario = hourly(&[(0.0, 1000.0, 0.25, 0.05); 2]);

        for snapping in [Snapping::Nearest, Snapping::Interpolate] {
            let trajectory = Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(50.0))
                .grid_resolution(Percentage(10.0))
                .snapping(snapping)
                .build()
                .solve()
                .unwrap();
            assert_decisions(&trajectory, &[0.0, 0.0]);
            assert_abs_diff_eq!(trajectory.total_cost().0, 0.0, epsilon = 1e-9);
            assert!(trajectory.entering_soc(2) >= Percentage(50.0));
        }
    }

    #[test]
    fn test_minimize_activity_ok() {
        let battery = ideal_battery();
        let scenario = hourly(&[(0.0, 1000.0, 0.25, 0.0), (0.0, 1000.0, 0.2505, 0.0)]);
        let solver = |minimize_activity| {
            Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(50.0))
                .grid_resolution(Percentage(5.0))
                .minimize_activity(minimize_activity)
                .build()
                .solve()
                .unwrap()
        };

        let trajectory = solver(false);
        assert_decisions(&trajectory, &[1000.0, -1000.0]);
        assert_abs_diff_eq!(trajectory.total_cost().0, -0.0005, epsilon = 1e-9);

        // Half a cent per ten kilowatt-hours is not worth a cycle:
        let trajectory = solver(true);
        assert_decisions(&trajectory, &[0.0, 0.0]);
        assert_eq!(trajectory.total_cost(), Cost::ZERO);
    }

    #[test]
    fn test_prioritize_early_charge_ok() {
        let battery = ideal_battery();
        let scenario =
            hourly(&[(0.0, 0.0, 0.10, 0.0), (0.0, 0.0, 0.10, 0.0), (0.0, 2000.0, 0.30, 0.0)]);
        let solver = |prioritize_early_charge| {
            Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(50.0))
                .grid_resolution(Percentage(10.0))
                .prioritize_early_charge(prioritize_early_charge)
                .build()
                .solve()
                .unwrap()
        };
        assert_decisions(&solver(false), &[0.0, 2000.0, -2000.0]);

        let trajectory = solver(true);
        assert_decisions(&trajectory, &[2000.0, 0.0, -2000.0]);
        assert_abs_diff_eq!(trajectory.total_cost().0, -0.40, epsilon = 1e-9);
    }

    #[test]
    fn test_free_terminal_prefers_least_cycling() {
        let battery = ideal_battery();
        let scenario = hourly(&[(0.0, 1000.0, 0.30, 0.0), (0.0, 1000.0, 0.30, 0.0)]);
        let trajectory = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(50.0))
            .grid_resolution(Percentage(5.0))
            .terminal_condition(TerminalCondition::Free)
            .build()
            .solve()
            .unwrap();

        // Discharging beyond the demand earns nothing, so the battery only covers the demand:
        assert_decisions(&trajectory, &[-1000.0, -1000.0]);
        assert_abs_diff_eq!(trajectory.total_cost().0, -0.60, epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_and_rate_limits_hold() {
        let battery = BatteryParameters::builder()
            .capacity(WattHours(7500.0))
            .max_charge_rate(Watts(2500.0))
            .max_discharge_rate(Watts(1800.0))
            .min_soc(Percentage(15.0))
            .max_soc(Percentage(85.0))
            .charge_efficiency(Percentage(90.0))
            .discharge_efficiency(Percentage(92.0))
            .charge_degradation(KilowattHourPrice(0.01))
            .build()
            .unwrap();
        let rows: Vec<_> = (0..24)
            .map(|hour| {
                let hour = f64::from(hour);
                let generation = (3000.0 * ((hour - 6.0) / 12.0 * std::f64::consts::PI).sin()).max(0.0);
                let demand = 400.0 + 600.0 * (hour / 4.0).cos().abs();
                let tariff_import = 0.20 + 0.15 * (hour / 24.0 * 2.0 * std::f64::consts::PI).sin();
                (generation, demand, tariff_import, tariff_import * 0.6)
            })
            .collect();
        let scenario = hourly(&rows);

        for snapping in [Snapping::Nearest, Snapping::Interpolate] {
            let trajectory = Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(42.7))
                .grid_resolution(Percentage(2.5))
                .snapping(snapping)
                .build()
                .solve()
                .unwrap();
            assert_eq!(trajectory.points.len(), 24);
            for point in &trajectory.points {
                assert!(battery.soc_bounds().contains(point.state_of_charge));
                assert!(battery.rate_limits().contains(point.decision));
            }
        }
    }

    #[test]
    fn test_infeasible_scenario() {
        let battery = BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts::ZERO)
            .max_discharge_rate(Watts(5000.0))
            .min_soc(Percentage(20.0))
            .build()
            .unwrap();
        let scenario = hourly(&[(0.0, 1000.0, 0.30, 0.0); 4]);
        let solver = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(30.0))
            .grid_resolution(Percentage(1.0))
            .grid_import_limit(Watts::ZERO);
        let result = solver.build().solve();
        match result {
            Err(Error::InfeasibleScenario { interval, timestamp }) => {
                assert_eq!(interval, 1);
                assert_eq!(timestamp, scenario.intervals()[1].timestamp);
            }
            _ => panic!("the scenario must be infeasible"),
        }
    }

    #[test]
    fn test_unlimited_import_is_feasible() {
        let battery = BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts::ZERO)
            .max_discharge_rate(Watts(5000.0))
            .min_soc(Percentage(20.0))
            .build()
            .unwrap();
        let scenario = hourly(&[(0.0, 1000.0, 0.30, 0.0); 4]);
        let trajectory = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(30.0))
            .grid_resolution(Percentage(1.0))
            .build()
            .solve()
            .unwrap();
        assert_decisions(&trajectory, &[0.0; 4]);
    }

    #[test]
    fn test_invalid_parameters() {
        let battery = ideal_battery();
        let scenario = hourly(&[(0.0, 1000.0, 0.30, 0.0)]);
        let solver = |initial_soc, grid_resolution| {
            Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(initial_soc))
                .grid_resolution(Percentage(grid_resolution))
                .build()
        };
        assert!(matches!(
            solver(10.0, 5.0).solve(),
            Err(Error::InvalidParameter { name: "initial_soc", .. }),
        ));
        assert!(matches!(
            solver(50.0, 0.0).solve(),
            Err(Error::InvalidParameter { name: "grid_resolution", .. }),
        ));
        assert!(matches!(
            Solver::builder()
                .scenario(&scenario)
                .battery(&battery)
                .initial_soc(Percentage(50.0))
                .grid_resolution(Percentage(5.0))
                .terminal_condition(TerminalCondition::AtLeast(Percentage(120.0)))
                .build()
                .solve(),
            Err(Error::InvalidParameter { name: "terminal_condition", .. }),
        ));
    }

    #[test]
    fn test_state_space_size_ok() {
        let battery = ideal_battery();
        let scenario = hourly(&[(0.0, 1000.0, 0.30, 0.0); 3]);
        let solver = Solver::builder()
            .scenario(&scenario)
            .battery(&battery)
            .initial_soc(Percentage(50.0))
            .grid_resolution(Percentage(5.0))
            .build();
        assert_eq!(solver.state_space_size(), 3 * 17);
    }
}
