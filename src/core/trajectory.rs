use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    core::{
        battery::{BatteryParameters, Simulator},
        cost::CostModel,
        interval::Interval,
    },
    quantity::{currency::Cost, power::Watts, ratios::Percentage, time::Hours},
};

#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Point {
    /// Interval start.
    pub timestamp: DateTime<Local>,

    /// Charge rate held during the interval.
    pub decision: Watts,

    /// State of charge at the end of the interval.
    pub state_of_charge: Percentage,

    /// Grid bill with the battery idle.
    pub baseline: Cost,

    /// Grid bill with the battery following the decision.
    pub bill: Cost,

    pub degradation: Cost,
}

impl Point {
    /// Marginal cost of the decision.
    pub fn cost(&self) -> Cost {
        self.bill - self.baseline + self.degradation
    }
}

/// Battery decisions over the whole scenario, one point per interval.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Trajectory {
    pub initial_soc: Percentage,
    pub points: Vec<Point>,
}

impl Trajectory {
    /// State of charge when entering the interval.
    pub fn entering_soc(&self, index: usize) -> Percentage {
        match index {
            0 => self.initial_soc,
            _ => self.points[index - 1].state_of_charge,
        }
    }

    pub fn decisions(&self) -> impl Iterator<Item = Watts> {
        self.points.iter().map(|point| point.decision)
    }

    /// Total marginal cost against the idle battery.
    pub fn total_cost(&self) -> Cost {
        self.points.iter().map(Point::cost).sum()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            baseline: self.points.iter().map(|point| point.baseline).sum(),
            bill: self.points.iter().map(|point| point.bill).sum(),
            degradation: self.points.iter().map(|point| point.degradation).sum(),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Summary {
    /// Total bill without using the battery.
    pub baseline: Cost,

    /// Total grid bill with the battery.
    pub bill: Cost,

    /// Total battery wear.
    pub degradation: Cost,
}

impl Summary {
    pub fn savings(&self) -> Cost {
        self.baseline - self.bill - self.degradation
    }
}

/// Runs the battery interval by interval and records the trajectory.
pub struct Recorder<'a> {
    simulator: Simulator<'a>,
    cost_model: CostModel<'a>,
    trajectory: Trajectory,
}

impl<'a> Recorder<'a> {
    pub fn new(
        parameters: &'a BatteryParameters,
        duration: Hours,
        initial_soc: Percentage,
        capacity: usize,
    ) -> Self {
        Self {
            simulator: Simulator::new(parameters, duration, initial_soc),
            cost_model: CostModel::new(parameters, duration),
            trajectory: Trajectory { initial_soc, points: Vec::with_capacity(capacity) },
        }
    }

    pub const fn simulator(&self) -> &Simulator<'a> {
        &self.simulator
    }

    /// Execute the decision within the interval and record the outcome.
    ///
    /// The decision gets clamped into what the battery is able to execute.
    pub fn record(&mut self, interval: &Interval, decision: Watts) {
        let decision = self.simulator.apply(decision);
        self.trajectory.points.push(Point {
            timestamp: interval.timestamp,
            decision,
            state_of_charge: self.simulator.state_of_charge,
            baseline: self.cost_model.baseline(interval),
            bill: self.cost_model.bill_with(interval, decision),
            degradation: self.cost_model.degradation(decision),
        });
    }

    pub fn finish(self) -> Trajectory {
        self.trajectory
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{core::scenario::tests::hourly, quantity::energy::WattHours};

    #[test]
    fn test_record_ok() {
        let parameters = BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(2000.0))
            .max_discharge_rate(Watts(2000.0))
            .max_soc(Percentage(80.0))
            .build()
            .unwrap();
        let scenario = hourly(&[(0.0, 500.0, 0.10, 0.0), (0.0, 500.0, 0.40, 0.0)]);
        let mut recorder = Recorder::new(&parameters, Hours(1.0), Percentage(70.0), 2);
        recorder.record(&scenario.intervals()[0], Watts(2000.0));
        recorder.record(&scenario.intervals()[1], Watts(-500.0));
        let trajectory = recorder.finish();

        // The battery fills up before the hour ends:
        assert_abs_diff_eq!(trajectory.points[0].decision.0, 1000.0);

        assert_eq!(trajectory.entering_soc(0), Percentage(70.0));
        assert_abs_diff_eq!(trajectory.entering_soc(1).0, 80.0);
        assert_abs_diff_eq!(trajectory.points[1].state_of_charge.0, 75.0);

        let summary = trajectory.summary();
        assert_abs_diff_eq!(summary.baseline.0, 0.05 + 0.20, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.bill.0, 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.savings().0, 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.total_cost().0, -0.10, epsilon = 1e-12);
    }
}
