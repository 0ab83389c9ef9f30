use bon::bon;
use serde::Serialize;

use crate::{
    core::error::ensure_parameter,
    ops::RangeInclusive,
    prelude::*,
    quantity::{
        Zero,
        currency::Cost,
        energy::{KilowattHours, WattHours},
        power::Watts,
        price::KilowattHourPrice,
        ratios::Percentage,
        time::Hours,
    },
};

/// Immutable battery model, validated on construction.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct BatteryParameters {
    capacity: WattHours,
    max_charge_rate: Watts,
    max_discharge_rate: Watts,
    min_soc: Percentage,
    max_soc: Percentage,
    charge_efficiency: Percentage,
    discharge_efficiency: Percentage,

    /// Wear cost per kilowatt-hour stored.
    charge_degradation: KilowattHourPrice,

    /// Wear cost per kilowatt-hour released.
    discharge_degradation: KilowattHourPrice,
}

#[bon]
impl BatteryParameters {
    #[builder]
    pub fn new(
        capacity: WattHours,
        max_charge_rate: Watts,
        max_discharge_rate: Watts,
        #[builder(default = Percentage::ZERO)] min_soc: Percentage,
        #[builder(default = Percentage::HUNDRED)] max_soc: Percentage,
        #[builder(default = Percentage::HUNDRED)] charge_efficiency: Percentage,
        #[builder(default = Percentage::HUNDRED)] discharge_efficiency: Percentage,
        #[builder(default = KilowattHourPrice::ZERO)] charge_degradation: KilowattHourPrice,
        #[builder(default = KilowattHourPrice::ZERO)] discharge_degradation: KilowattHourPrice,
    ) -> Result<Self> {
        ensure_parameter!(
            capacity.is_finite() && capacity > WattHours::ZERO,
            "capacity",
            "must be positive, got {capacity}"
        );
        ensure_parameter!(
            max_charge_rate.is_finite() && max_charge_rate >= Watts::ZERO,
            "max_charge_rate",
            "must not be negative, got {max_charge_rate}"
        );
        ensure_parameter!(
            max_discharge_rate.is_finite() && max_discharge_rate >= Watts::ZERO,
            "max_discharge_rate",
            "must not be negative, got {max_discharge_rate}"
        );
        for (name, soc) in [("min_soc", min_soc), ("max_soc", max_soc)] {
            if !(soc.is_finite() && (Percentage::ZERO..=Percentage::HUNDRED).contains(&soc)) {
                return Err(Error::invalid_parameter(name, format!("must be within 0..=100, got {soc}")));
            }
        }
        ensure_parameter!(
            min_soc <= max_soc,
            "min_soc",
            "must not exceed the maximum state of charge ({min_soc} > {max_soc})"
        );
        for (name, efficiency) in
            [("charge_efficiency", charge_efficiency), ("discharge_efficiency", discharge_efficiency)]
        {
            if !(efficiency.is_finite()
                && efficiency > Percentage::ZERO
                && efficiency <= Percentage::HUNDRED)
            {
                return Err(Error::invalid_parameter(
                    name,
                    format!("must be within (0, 100], got {efficiency}"),
                ));
            }
        }
        for (name, degradation) in [
            ("charge_degradation", charge_degradation),
            ("discharge_degradation", discharge_degradation),
        ] {
            if !(degradation.is_finite() && degradation >= KilowattHourPrice::ZERO) {
                return Err(Error::invalid_parameter(
                    name,
                    format!("must not be negative, got {degradation}"),
                ));
            }
        }
        Ok(Self {
            capacity,
            max_charge_rate,
            max_discharge_rate,
            min_soc,
            max_soc,
            charge_efficiency,
            discharge_efficiency,
            charge_degradation,
            discharge_degradation,
        })
    }
}

impl BatteryParameters {
    pub const fn capacity(&self) -> WattHours {
        self.capacity
    }

    pub const fn max_charge_rate(&self) -> Watts {
        self.max_charge_rate
    }

    pub const fn max_discharge_rate(&self) -> Watts {
        self.max_discharge_rate
    }

    pub const fn min_soc(&self) -> Percentage {
        self.min_soc
    }

    pub const fn max_soc(&self) -> Percentage {
        self.max_soc
    }

    pub const fn charge_efficiency(&self) -> Percentage {
        self.charge_efficiency
    }

    pub const fn discharge_efficiency(&self) -> Percentage {
        self.discharge_efficiency
    }

    pub const fn soc_bounds(&self) -> RangeInclusive<Percentage> {
        RangeInclusive { min: self.min_soc, max: self.max_soc }
    }

    /// Signed charge rate limits: the maximum discharge is the negative bound.
    pub fn rate_limits(&self) -> RangeInclusive<Watts> {
        RangeInclusive { min: -self.max_discharge_rate, max: self.max_charge_rate }
    }

    /// State-of-charge change caused by the decision held for the duration.
    pub fn soc_delta(&self, decision: Watts, duration: Hours) -> Percentage {
        Percentage::from_ratio((decision * duration) / self.capacity)
    }

    /// Charge rate that moves the state of charge by the delta within the duration.
    pub fn rate_for(&self, soc_delta: Percentage, duration: Hours) -> Watts {
        (self.capacity * soc_delta) / duration
    }

    /// Grid-side power of the battery, losses included.
    pub fn grid_power(&self, decision: Watts) -> Watts {
        if decision > Watts::ZERO {
            decision / self.charge_efficiency.to_ratio()
        } else {
            decision * self.discharge_efficiency.to_ratio()
        }
    }

    /// Inverse of [`Self::grid_power`].
    pub fn decision_for_grid_power(&self, grid_power: Watts) -> Watts {
        if grid_power > Watts::ZERO {
            grid_power * self.charge_efficiency.to_ratio()
        } else {
            grid_power / self.discharge_efficiency.to_ratio()
        }
    }

    /// Wear cost of cycling the battery at the given rate.
    pub fn degradation(&self, decision: Watts, duration: Hours) -> Cost {
        let cycled = KilowattHours::from(decision.abs() * duration);
        if decision > Watts::ZERO {
            cycled * self.charge_degradation
        } else {
            cycled * self.discharge_degradation
        }
    }
}
