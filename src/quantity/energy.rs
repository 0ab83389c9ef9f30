use std::ops::Mul;

use crate::quantity::ratios::Percentage;

quantity!(WattHours, via: f64, suffix: "Wh", precision: 0);
quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 3);

impl From<WattHours> for KilowattHours {
    fn from(watt_hours: WattHours) -> Self {
        Self(watt_hours.0 * 0.001)
    }
}

impl Mul<Percentage> for WattHours {
    type Output = Self;

    fn mul(self, percentage: Percentage) -> Self::Output {
        self * percentage.to_ratio()
    }
}
