use crate::quantity::{energy::KilowattHours, price::KilowattHourPrice};

quantity!(Cost, via: f64, suffix: "$", precision: 2);

implement_mul!(KilowattHourPrice, KilowattHours, Cost);

impl Cost {
    pub const ONE_CENT: Self = Self(0.01);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_energy_cost_ok() {
        let cost = KilowattHours(2.0) * KilowattHourPrice(0.25);
        assert_abs_diff_eq!(cost.0, 0.5);
        assert_eq!(cost, KilowattHourPrice(0.25) * KilowattHours(2.0));
    }
}
