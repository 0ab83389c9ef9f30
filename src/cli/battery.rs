//! Battery-related CLI arguments.

use clap::Parser;
use reynard::{
    core::battery::{BatteryParameters, BatteryStatus},
    quantity::{
        energy::WattHours,
        power::Watts,
        price::KilowattHourPrice,
        ratios::Percentage,
    },
};

use crate::cli::prelude::*;

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryPowerLimits {
    /// Charging power in watts.
    #[clap(long = "charging-power-watts", default_value = "5000", env = "CHARGING_POWER_WATTS")]
    pub charging: Watts,

    /// Discharging power in watts.
    #[clap(
        long = "discharging-power-watts",
        default_value = "5000",
        env = "DISCHARGING_POWER_WATTS"
    )]
    pub discharging: Watts,
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryEfficiencyArgs {
    /// Share of the grid energy that gets stored when charging.
    #[clap(long = "charging-efficiency-percent", default_value = "100", env = "CHARGING_EFFICIENCY_PERCENT")]
    pub charging_efficiency: Percentage,

    /// Share of the stored energy that reaches the household when discharging.
    #[clap(
        long = "discharging-efficiency-percent",
        default_value = "100",
        env = "DISCHARGING_EFFICIENCY_PERCENT"
    )]
    pub discharging_efficiency: Percentage,
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct DegradationArgs {
    /// Battery wear cost per kilowatt-hour charged.
    #[clap(long = "charging-degradation-per-kwh", default_value = "0", env = "CHARGING_DEGRADATION_PER_KWH")]
    pub charging_degradation: KilowattHourPrice,

    /// Battery wear cost per kilowatt-hour discharged.
    #[clap(
        long = "discharging-degradation-per-kwh",
        default_value = "0",
        env = "DISCHARGING_DEGRADATION_PER_KWH"
    )]
    pub discharging_degradation: KilowattHourPrice,
}

#[derive(Parser)]
pub struct BatteryArgs {
    /// Usable battery capacity in watt-hours.
    #[clap(long = "capacity-watt-hours", default_value = "13500", env = "CAPACITY_WATT_HOURS")]
    pub capacity: WattHours,

    #[clap(flatten)]
    pub power_limits: BatteryPowerLimits,

    /// Minimal allowed state of charge.
    #[clap(long = "min-state-of-charge-percent", default_value = "10", env = "MIN_STATE_OF_CHARGE_PERCENT")]
    pub min_state_of_charge: Percentage,

    /// Maximal allowed state of charge.
    #[clap(long = "max-state-of-charge-percent", default_value = "100", env = "MAX_STATE_OF_CHARGE_PERCENT")]
    pub max_state_of_charge: Percentage,

    /// State of charge at the start of the scenario.
    #[clap(long = "state-of-charge-percent", default_value = "50", env = "STATE_OF_CHARGE_PERCENT")]
    pub state_of_charge: Percentage,

    #[clap(flatten)]
    pub efficiency: BatteryEfficiencyArgs,

    #[clap(flatten)]
    pub degradation: DegradationArgs,
}

impl BatteryArgs {
    pub fn status(&self) -> Result<BatteryStatus> {
        let parameters = BatteryParameters::builder()
            .capacity(self.capacity)
            .max_charge_rate(self.power_limits.charging)
            .max_discharge_rate(self.power_limits.discharging)
            .min_soc(self.min_state_of_charge)
            .max_soc(self.max_state_of_charge)
            .charge_efficiency(self.efficiency.charging_efficiency)
            .discharge_efficiency(self.efficiency.discharging_efficiency)
            .charge_degradation(self.degradation.charging_degradation)
            .discharge_degradation(self.degradation.discharging_degradation)
            .build()
            .context("invalid battery parameters")?;
        Ok(BatteryStatus::new(parameters, self.state_of_charge)?)
    }
}
