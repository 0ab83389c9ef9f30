use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::quantity::{power::Watts, price::KilowattHourPrice};

/// Single scenario row.
#[must_use]
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Interval {
    /// Interval start.
    pub timestamp: DateTime<Local>,

    /// Average on-site generation.
    pub generation: Watts,

    /// Average household demand.
    pub demand: Watts,

    pub tariff_import: KilowattHourPrice,
    pub tariff_export: KilowattHourPrice,
}

impl Interval {
    /// Household power drawn from the grid before the battery acts, negative when exporting.
    pub fn net_load(&self) -> Watts {
        self.demand - self.generation
    }
}
