use crate::{
    core::{battery::BatteryParameters, error::ensure_parameter},
    prelude::*,
    quantity::ratios::Percentage,
};

/// Read-only view of a battery: its model and the current state of charge.
///
/// Real and simulated batteries differ only in where the state of charge comes from.
pub trait BatteryState {
    fn parameters(&self) -> &BatteryParameters;

    fn state_of_charge(&self) -> Percentage;
}

/// Snapshot of a battery at a known state of charge.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct BatteryStatus {
    parameters: BatteryParameters,
    state_of_charge: Percentage,
}

impl BatteryStatus {
    pub fn new(parameters: BatteryParameters, state_of_charge: Percentage) -> Result<Self> {
        ensure_parameter!(
            state_of_charge.is_finite() && parameters.soc_bounds().contains(state_of_charge),
            "state_of_charge",
            "must be within {:?}, got {state_of_charge}",
            parameters.soc_bounds()
        );
        Ok(Self { parameters, state_of_charge })
    }
}

impl BatteryState for BatteryStatus {
    fn parameters(&self) -> &BatteryParameters {
        &self.parameters
    }

    fn state_of_charge(&self) -> Percentage {
        self.state_of_charge
    }
}
