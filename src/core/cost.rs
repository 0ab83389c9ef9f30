use crate::{
    core::{battery::BatteryParameters, interval::Interval},
    quantity::{Zero, currency::Cost, energy::KilowattHours, power::Watts, time::Hours},
};

/// Monetary cost of charge rate decisions within a single interval.
///
/// The household net load is billed first. The battery decision then shifts the grid power,
/// and its cost is the difference it makes to the bill, plus wear.
#[derive(Copy, Clone)]
pub struct CostModel<'a> {
    pub parameters: &'a BatteryParameters,
    pub duration: Hours,
}

impl<'a> CostModel<'a> {
    pub const fn new(parameters: &'a BatteryParameters, duration: Hours) -> Self {
        Self { parameters, duration }
    }

    /// Grid bill of the interval, when the household (battery included) draws the grid power.
    ///
    /// Import is billed at the import tariff, export is credited at the export tariff.
    pub fn bill(&self, interval: &Interval, grid_power: Watts) -> Cost {
        let energy = KilowattHours::from(grid_power * self.duration);
        if energy > KilowattHours::ZERO {
            energy * interval.tariff_import
        } else {
            energy * interval.tariff_export
        }
    }

    /// Bill of the interval with the battery idle.
    pub fn baseline(&self, interval: &Interval) -> Cost {
        self.bill(interval, interval.net_load())
    }

    /// Bill of the interval with the battery following the decision, excluding wear.
    pub fn bill_with(&self, interval: &Interval, decision: Watts) -> Cost {
        self.bill(interval, interval.net_load() + self.parameters.grid_power(decision))
    }

    pub fn degradation(&self, decision: Watts) -> Cost {
        self.parameters.degradation(decision, self.duration)
    }

    /// Marginal cost of the decision: the bill difference against the idle battery, plus wear.
    pub fn cost(&self, decision: Watts, interval: &Interval) -> Cost {
        if decision == Watts::ZERO {
            return Cost::ZERO;
        }
        self.bill_with(interval, decision) - self.baseline(interval) + self.degradation(decision)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::scenario::tests::hourly,
        quantity::{energy::WattHours, price::KilowattHourPrice, ratios::Percentage},
    };

    fn parameters() -> BatteryParameters {
        BatteryParameters::builder()
            .capacity(WattHours(10_000.0))
            .max_charge_rate(Watts(5000.0))
            .max_discharge_rate(Watts(5000.0))
            .charge_efficiency(Percentage(80.0))
            .discharge_efficiency(Percentage(90.0))
            .charge_degradation(KilowattHourPrice(0.01))
            .discharge_degradation(KilowattHourPrice(0.02))
            .build()
            .unwrap()
    }

    #[test]
    fn test_charging_without_load_ok() {
        let parameters = parameters();
        let scenario = hourly(&[(0.0, 0.0, 0.25, 0.05)]);
        let cost_model = CostModel::new(&parameters, Hours(1.0));

        // 2 kWh stored draws 2.5 kWh and wears 2 kWh:
        let cost = cost_model.cost(Watts(2000.0), &scenario.intervals()[0]);
        assert_abs_diff_eq!(cost.0, 2.5 * 0.25 + 2.0 * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_discharging_without_load_ok() {
        let parameters = parameters();
        let scenario = hourly(&[(0.0, 0.0, 0.25, 0.05)]);
        let cost_model = CostModel::new(&parameters, Hours(1.0));

        // 2 kWh released delivers 1.8 kWh:
        let cost = cost_model.cost(Watts(-2000.0), &scenario.intervals()[0]);
        assert_abs_diff_eq!(cost.0, -1.8 * 0.05 + 2.0 * 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_discharging_into_demand_ok() {
        let parameters = parameters();
        let scenario = hourly(&[(0.0, 1000.0, 0.25, 0.05)]);
        let cost_model = CostModel::new(&parameters, Hours(1.0));

        // 1 kWh of the 2.25 kWh delivered covers the demand, the rest is exported:
        let cost = cost_model.cost(Watts(-2500.0), &scenario.intervals()[0]);
        assert_abs_diff_eq!(cost.0, -0.25 - 1.25 * 0.05 + 2.5 * 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_idle_is_free() {
        let parameters = parameters();
        let scenario = hourly(&[(300.0, 1200.0, 0.25, 0.05)]);
        let cost_model = CostModel::new(&parameters, Hours(1.0));
        assert_eq!(cost_model.cost(Watts::ZERO, &scenario.intervals()[0]), Cost::ZERO);
        assert_abs_diff_eq!(cost_model.baseline(&scenario.intervals()[0]).0, 0.9 * 0.25, epsilon = 1e-12);
    }
}
