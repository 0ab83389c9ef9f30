use std::fmt::{Display, Formatter};

use comfy_table::Color;

use crate::{
    core::{battery::BatteryParameters, interval::Interval, scenario::Scenario},
    quantity::{Zero, power::Watts, price::KilowattHourPrice, ratios::Percentage},
};

/// Decides the charge rate of a single interval.
///
/// Controllers are stateless: the decision depends only on the interval data and the state of
/// charge when entering the interval.
pub trait Controller {
    /// Unique identifier within a controller set.
    fn id(&self) -> &str;

    /// Charge rate to hold during the interval, positive when charging.
    fn decide(&self, interval: &Interval, state_of_charge: Percentage) -> Watts;
}

/// Simple rule-based controllers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RuleController {
    DoNothing,

    StaticCharge {
        rate: Watts,
    },

    StaticDischarge {
        rate: Watts,
    },

    /// Charge on excess solar power, compensate on insufficient solar power.
    SolarSelfConsumption,

    /// Cover the demand from the battery when the import tariff is high, charge otherwise.
    TariffThreshold {
        threshold: KilowattHourPrice,
        charge_rate: Watts,
    },

    /// Charge when importing is cheap, discharge when exporting pays.
    SpotPriceArbitrage {
        threshold: KilowattHourPrice,
        charge_rate: Watts,
        discharge_rate: Watts,
    },
}

impl Controller for RuleController {
    fn id(&self) -> &str {
        ControllerKind::from(self).id()
    }

    fn decide(&self, interval: &Interval, _state_of_charge: Percentage) -> Watts {
        match *self {
            Self::DoNothing => Watts::ZERO,
            Self::StaticCharge { rate } => rate,
            Self::StaticDischarge { rate } => -rate,
            Self::SolarSelfConsumption => interval.generation - interval.demand,
            Self::TariffThreshold { threshold, charge_rate } => {
                if interval.tariff_import >= threshold {
                    -interval.demand
                } else {
                    charge_rate
                }
            }
            Self::SpotPriceArbitrage { threshold, charge_rate, discharge_rate } => {
                if interval.tariff_import < threshold {
                    charge_rate
                } else if interval.tariff_export > threshold {
                    -discharge_rate
                } else {
                    Watts::ZERO
                }
            }
        }
    }
}

/// Built-in controller selection.
#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum ControllerKind {
    /// Keep the battery idle.
    DoNothing,

    /// Charge at the maximum rate.
    StaticCharge,

    /// Discharge at the maximum rate.
    StaticDischarge,

    /// Follow the solar surplus or deficit.
    SolarSelfConsumption,

    /// Discharge to meet the demand when the import tariff is at or above the average.
    TariffThreshold,

    /// Charge below and discharge above the midpoint between the cheapest import and the best
    /// export tariff.
    SpotPriceArbitrage,
}

impl ControllerKind {
    pub const fn id(self) -> &'static str {
        match self {
            Self::DoNothing => "do-nothing",
            Self::StaticCharge => "static-charge",
            Self::StaticDischarge => "static-discharge",
            Self::SolarSelfConsumption => "solar-self-consumption",
            Self::TariffThreshold => "tariff-threshold",
            Self::SpotPriceArbitrage => "spot-price-arbitrage",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::StaticCharge => Color::Green,
            Self::StaticDischarge => Color::Blue,
            Self::SolarSelfConsumption => Color::DarkYellow,
            Self::TariffThreshold => Color::Magenta,
            Self::SpotPriceArbitrage => Color::Cyan,
            Self::DoNothing => Color::Reset,
        }
    }

    /// Parametrize the controller for the scenario and the battery.
    pub fn instantiate(self, scenario: &Scenario, battery: &BatteryParameters) -> RuleController {
        match self {
            Self::DoNothing => RuleController::DoNothing,
            Self::StaticCharge => RuleController::StaticCharge { rate: battery.max_charge_rate() },
            Self::StaticDischarge => {
                RuleController::StaticDischarge { rate: battery.max_discharge_rate() }
            }
            Self::SolarSelfConsumption => RuleController::SolarSelfConsumption,
            Self::TariffThreshold => RuleController::TariffThreshold {
                threshold: scenario.mean_import_tariff(),
                charge_rate: battery.max_charge_rate(),
            },
            Self::SpotPriceArbitrage => {
                let min_import = scenario.min_import_tariff();
                RuleController::SpotPriceArbitrage {
                    threshold: min_import + (scenario.max_export_tariff() - min_import) / 2.0,
                    charge_rate: battery.max_charge_rate(),
                    discharge_rate: battery.max_discharge_rate(),
                }
            }
        }
    }

    /// Look the kind up by the controller identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        enumset::EnumSet::<Self>::all().iter().find(|kind| kind.id() == id)
    }
}

impl From<&RuleController> for ControllerKind {
    fn from(controller: &RuleController) -> Self {
        match controller {
            RuleController::DoNothing => Self::DoNothing,
            RuleController::StaticCharge { .. } => Self::StaticCharge,
            RuleController::StaticDischarge { .. } => Self::StaticDischarge,
            RuleController::SolarSelfConsumption => Self::SolarSelfConsumption,
            RuleController::TariffThreshold { .. } => Self::TariffThreshold,
            RuleController::SpotPriceArbitrage { .. } => Self::SpotPriceArbitrage,
        }
    }
}

impl Display for ControllerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoNothing => write!(f, "Do nothing"),
            Self::StaticCharge => write!(f, "Charge"),
            Self::StaticDischarge => write!(f, "Discharge"),
            Self::SolarSelfConsumption => write!(f, "Self-use"),
            Self::TariffThreshold => write!(f, "Tariff threshold"),
            Self::SpotPriceArbitrage => write!(f, "Arbitrage"),
        }
    }
}
