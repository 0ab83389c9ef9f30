use std::ops::Div;

use crate::quantity::{energy::WattHours, time::Hours};

quantity!(Watts, via: f64, suffix: "W", precision: 0);

implement_mul!(Watts, Hours, WattHours);

impl Div<Hours> for WattHours {
    type Output = Watts;

    fn div(self, hours: Hours) -> Self::Output {
        Watts(self.0 / hours.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_over_time_ok() {
        assert_eq!(Watts(1500.0) * Hours(0.5), WattHours(750.0));
        assert_eq!(WattHours(750.0) / Hours(0.5), Watts(1500.0));
    }

    #[test]
    fn test_display_ok() {
        assert_eq!(Watts(1234.4).to_string(), "1234 W");
        assert_eq!(format!("{:?}", Watts(-800.0)), "-800W");
    }
}
