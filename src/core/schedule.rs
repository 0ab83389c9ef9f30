use std::fmt::{Display, Formatter};

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        battery::BatteryState,
        controller::{Controller, ControllerKind},
        error::ensure_parameter,
        scenario::Scenario,
        trajectory::{Recorder, Trajectory},
    },
    ops::{RangeExclusive, TimeSpan},
    prelude::*,
};

/// Maximal run of consecutive intervals driven by the same controller.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScheduleEntry {
    /// Scenario interval indices.
    pub intervals: RangeExclusive<usize>,

    /// Wall-clock span of the intervals.
    pub span: TimeSpan,

    /// Controller identifier.
    pub controller: String,
}

/// Compact controller schedule, exhaustive and non-overlapping over the scenario.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Schedule(Vec<ScheduleEntry>);

impl Schedule {
    /// Merge consecutive intervals assigned the same controller.
    ///
    /// The assignment must contain one controller identifier per scenario interval.
    pub fn compress<'a>(
        scenario: &Scenario,
        assignment: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let assignment = assignment.into_iter().collect_vec();
        ensure_parameter!(
            assignment.len() == scenario.len(),
            "assignment",
            "must have {} controllers, got {}",
            scenario.len(),
            assignment.len()
        );
        let entries = assignment
            .into_iter()
            .enumerate()
            .chunk_by(|(_, controller)| *controller)
            .into_iter()
            .map(|(controller, run)| {
                let indices = run.map(|(index, _)| index).collect_vec();
                let intervals =
                    RangeExclusive { start: indices[0], end: indices[0] + indices.len() };
                ScheduleEntry {
                    intervals,
                    span: TimeSpan {
                        start: scenario.span(intervals.start).start,
                        end: scenario.span(intervals.end - 1).end,
                    },
                    controller: controller.to_string(),
                }
            })
            .collect();
        Ok(Self(entries))
    }

    /// Number of the covered intervals.
    fn n_intervals(&self) -> usize {
        self.0.last().map_or(0, |entry| entry.intervals.end)
    }

    /// Per-interval controller identifiers.
    pub fn expand(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flat_map(|entry| {
            std::iter::repeat_n(entry.controller.as_str(), entry.intervals.len())
        })
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.0
    }

    /// Run the scheduled controllers chained over the scenario, starting from the battery state.
    ///
    /// Unlike the synthesis, each controller sees the state of charge the previous decisions
    /// actually led to.
    #[instrument(skip_all)]
    pub fn replay<C: Controller>(
        &self,
        scenario: &Scenario,
        battery: &impl BatteryState,
        controllers: &[C],
    ) -> Result<Trajectory> {
        ensure_parameter!(
            self.n_intervals() == scenario.len(),
            "schedule",
            "covers {} intervals, the scenario has {}",
            self.n_intervals(),
            scenario.len()
        );
        let mut recorder = Recorder::new(
            battery.parameters(),
            scenario.duration(),
            battery.state_of_charge(),
            scenario.len(),
        );
        for entry in &self.0 {
            let Some(controller) =
                controllers.iter().find(|controller| controller.id() == entry.controller)
            else {
                return Err(Error::invalid_parameter(
                    "controllers",
                    format!("scheduled controller `{}` is missing", entry.controller),
                ));
            };
            for interval in &scenario.intervals()[entry.intervals.iter()] {
                let state_of_charge = recorder.simulator().state_of_charge;
                recorder.record(interval, controller.decide(interval, state_of_charge));
            }
        }
        let trajectory = recorder.finish();
        debug!(total_cost = ?trajectory.total_cost(), "replayed");
        Ok(trajectory)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .enforce_styling()
            .set_header(vec!["Date", "Start", "End", "Intervals", "Controller"]);
        for entry in &self.0 {
            let color =
                ControllerKind::from_id(&entry.controller).map_or(Color::Reset, ControllerKind::color);
            table.add_row(vec![
                Cell::new(entry.span.start.format("%b %d")).add_attribute(Attribute::Dim),
                Cell::new(entry.span.start.format("%H:%M")),
                Cell::new(entry.span.end.format("%H:%M")).add_attribute(Attribute::Dim),
                Cell::new(entry.intervals.len()).set_alignment(CellAlignment::Right),
                Cell::new(&entry.controller).fg(color),
            ]);
        }
        write!(f, "{table}")
    }
}
