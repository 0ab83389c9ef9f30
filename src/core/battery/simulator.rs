use crate::{
    core::battery::BatteryParameters,
    ops::RangeInclusive,
    quantity::{Zero, power::Watts, ratios::Percentage, time::Hours},
};

/// Battery executing charge rate decisions interval by interval.
#[derive(Copy, Clone)]
pub struct Simulator<'a> {
    pub parameters: &'a BatteryParameters,

    /// Interval duration.
    pub duration: Hours,

    /// Current state of charge.
    pub state_of_charge: Percentage,
}

impl<'a> Simulator<'a> {
    pub const fn new(
        parameters: &'a BatteryParameters,
        duration: Hours,
        state_of_charge: Percentage,
    ) -> Self {
        Self { parameters, duration, state_of_charge }
    }

    /// Decisions that respect the rate limits and keep the state of charge within bounds.
    ///
    /// The range contains zero as long as the current state of charge is within bounds.
    pub fn feasible_range(&self) -> RangeInclusive<Watts> {
        let bounds = self.parameters.soc_bounds();
        let headroom = RangeInclusive {
            min: self.parameters.rate_for(bounds.min - self.state_of_charge, self.duration),
            max: self.parameters.rate_for(bounds.max - self.state_of_charge, self.duration),
        };
        self.parameters.rate_limits().intersect(headroom)
    }

    /// Clamp the requested decision into what the battery is able to execute.
    pub fn clamp(&self, decision: Watts) -> Watts {
        let range = self.feasible_range();
        if range.is_empty() { Watts::ZERO } else { range.clamp(decision) }
    }

    /// State of charge after holding the decision for the interval, without applying it.
    pub fn peek(&self, decision: Watts) -> Percentage {
        self.parameters
            .soc_bounds()
            .clamp(self.state_of_charge + self.parameters.soc_delta(decision, self.duration))
    }

    /// Execute the decision and return the decision actually applied.
    pub fn apply(&mut self, decision: Watts) -> Watts {
        let decision = self.clamp(decision);
        self.state_of_charge = self.peek(decision);
        decision
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::energy::WattHours;

    fn parameters() -> BatteryParameters {
        BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(2000.0))
            .max_discharge_rate(Watts(3000.0))
            .min_soc(Percentage(20.0))
            .max_soc(Percentage(90.0))
            .charge_efficiency(Percentage(90.0))
            .build()
            .unwrap()
    }

    /// Verify normal charging without overflowing.
    #[test]
    fn normal_operation() {
        let parameters = parameters();
        let mut simulator = Simulator::new(&parameters, Hours(1.0), Percentage(50.0));
        assert_eq!(simulator.apply(Watts(1000.0)), Watts(1000.0));

        // Efficiency affects the bill, not the stored energy:
        assert_abs_diff_eq!(simulator.state_of_charge.0, 60.0);
    }

    /// Verify capping at the maximum.
    #[test]
    fn overflow() {
        let parameters = parameters();
        let mut simulator = Simulator::new(&parameters, Hours(1.0), Percentage(85.0));
        assert_abs_diff_eq!(simulator.apply(Watts(2000.0)).0, 500.0);
        assert_eq!(simulator.state_of_charge, Percentage(90.0));
    }

    /// Verify capping at the minimum.
    #[test]
    fn underflow() {
        let parameters = parameters();
        let mut simulator = Simulator::new(&parameters, Hours(0.5), Percentage(25.0));
        assert_abs_diff_eq!(simulator.apply(Watts(-3000.0)).0, -1000.0);
        assert_eq!(simulator.state_of_charge, Percentage(20.0));
    }

    #[test]
    fn rate_limits() {
        let parameters = parameters();
        let range = Simulator::new(&parameters, Hours(1.0), Percentage(50.0)).feasible_range();
        assert_eq!(range, RangeInclusive { min: Watts(-3000.0), max: Watts(2000.0) });
    }
}
