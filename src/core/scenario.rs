use std::{fs::File, io::Read, path::Path};

use chrono::TimeDelta;
use itertools::Itertools;

use crate::{
    core::{error::ensure_parameter, interval::Interval},
    ops::TimeSpan,
    prelude::*,
    quantity::{price::KilowattHourPrice, time::Hours},
};

/// Forecast over the optimization horizon: regularly spaced intervals.
///
/// Regular spacing is assumed, not enforced.
#[must_use]
#[derive(Clone, Debug)]
pub struct Scenario {
    intervals: Vec<Interval>,
    resolution: TimeDelta,
}

impl Scenario {
    /// Build the scenario.
    ///
    /// The resolution is inferred from the first two timestamps, unless given explicitly.
    pub fn new(intervals: Vec<Interval>, resolution: Option<TimeDelta>) -> Result<Self> {
        ensure_parameter!(!intervals.is_empty(), "scenario", "must contain at least one interval");
        let resolution = match (resolution, intervals.as_slice()) {
            (Some(resolution), _) => resolution,
            (None, [first, second, ..]) => second.timestamp - first.timestamp,
            (None, _) => {
                return Err(Error::invalid_parameter(
                    "resolution",
                    "cannot be inferred from a single interval",
                ));
            }
        };
        ensure_parameter!(
            resolution > TimeDelta::zero(),
            "resolution",
            "must be positive, got {resolution}"
        );
        if let Some((index, _)) = intervals.iter().find_position(|interval| {
            !(interval.generation.is_finite()
                && interval.demand.is_finite()
                && interval.tariff_import.is_finite()
                && interval.tariff_export.is_finite())
        }) {
            return Err(Error::invalid_parameter(
                "scenario",
                format!("interval #{index} contains a non-finite value"),
            ));
        }
        Ok(Self { intervals, resolution })
    }

    /// Read the scenario from CSV with the `timestamp`, `generation`, `demand`, `tariff_import`,
    /// and `tariff_export` columns.
    pub fn from_reader(reader: impl Read, resolution: Option<TimeDelta>) -> Result<Self> {
        let intervals = csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<Result<Vec<Interval>, csv::Error>>()?;
        debug!(n_intervals = intervals.len(), "read the scenario");
        Self::new(intervals, resolution)
    }

    pub fn from_path(path: &Path, resolution: Option<TimeDelta>) -> Result<Self> {
        let file = File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(file, resolution)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always `false`: the scenario is never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn resolution(&self) -> TimeDelta {
        self.resolution
    }

    /// Interval duration.
    pub fn duration(&self) -> Hours {
        Hours::from(self.resolution)
    }

    /// Wall-clock span of the interval.
    pub fn span(&self, index: usize) -> TimeSpan {
        let start = self.intervals[index].timestamp;
        TimeSpan { start, end: start + self.resolution }
    }

    pub fn mean_import_tariff(&self) -> KilowattHourPrice {
        #[expect(clippy::cast_precision_loss)]
        let len = self.intervals.len() as f64;
        self.intervals.iter().map(|interval| interval.tariff_import).sum::<KilowattHourPrice>() / len
    }

    pub fn min_import_tariff(&self) -> KilowattHourPrice {
        self.intervals.iter().map(|interval| interval.tariff_import).min().unwrap_or_default()
    }

    pub fn max_export_tariff(&self) -> KilowattHourPrice {
        self.intervals.iter().map(|interval| interval.tariff_export).max().unwrap_or_default()
    }
}
