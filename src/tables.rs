use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use reynard::{
    core::{
        battery::BatteryParameters,
        controller::ControllerKind,
        scenario::Scenario,
        schedule::Schedule,
        trajectory::{Point, Trajectory},
    },
    quantity::{Zero, currency::Cost, power::Watts},
};

/// Render the optimal trajectory next to the decisions of the synthesized schedule.
#[must_use]
pub fn build_trajectory_table(
    scenario: &Scenario,
    battery: &BatteryParameters,
    optimal: &Trajectory,
    schedule: &Schedule,
    realized: &Trajectory,
) -> Table {
    let mean_tariff = scenario.mean_import_tariff();
    let min_soc = battery.min_soc();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec![
        "Date",
        "Start",
        "Import",
        "Export",
        "Net load",
        "Optimal",
        "SoC",
        "Cost",
        "Controller",
        "Realized",
        "SoC",
    ]);
    let rows = scenario
        .intervals()
        .iter()
        .zip(&optimal.points)
        .zip(schedule.expand())
        .zip(&realized.points);
    for (((interval, optimal_point), controller), realized_point) in rows {
        let controller_color =
            ControllerKind::from_id(controller).map_or(Color::Reset, ControllerKind::color);
        table.add_row(vec![
            Cell::new(interval.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(interval.timestamp.format("%H:%M")),
            Cell::new(interval.tariff_import).fg(if interval.tariff_import >= mean_tariff {
                Color::Red
            } else {
                Color::Green
            }),
            Cell::new(interval.tariff_export).add_attribute(Attribute::Dim),
            Cell::new(interval.net_load()).set_alignment(CellAlignment::Right).fg(
                if interval.net_load() <= Watts::ZERO { Color::Green } else { Color::DarkYellow },
            ),
            decision_cell(optimal_point),
            Cell::new(optimal_point.state_of_charge).set_alignment(CellAlignment::Right).fg(
                if optimal_point.state_of_charge > min_soc { Color::Reset } else { Color::Red },
            ),
            Cell::new(optimal_point.cost()).set_alignment(CellAlignment::Right).fg(
                if optimal_point.cost() >= Cost::ONE_CENT { Color::Red } else { Color::Green },
            ),
            Cell::new(controller).fg(controller_color),
            decision_cell(realized_point),
            Cell::new(realized_point.state_of_charge).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn decision_cell(point: &Point) -> Cell {
    Cell::new(point.decision).set_alignment(CellAlignment::Right).fg(
        match point.decision.cmp(&Watts::ZERO) {
            std::cmp::Ordering::Greater => Color::Green,
            std::cmp::Ordering::Less => Color::Red,
            std::cmp::Ordering::Equal => Color::Reset,
        },
    )
}

/// Compare the optimal and the realized costs.
#[must_use]
pub fn build_comparison_table(optimal: &Trajectory, realized: &Trajectory) -> Table {
    let optimal_summary = optimal.summary();
    let realized_summary = realized.summary();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["", "Bill", "Degradation", "Savings"]);
    for (title, summary) in [("Optimal", optimal_summary), ("Schedule", realized_summary)] {
        table.add_row(vec![
            Cell::new(title).add_attribute(Attribute::Bold),
            Cell::new(summary.bill).set_alignment(CellAlignment::Right),
            Cell::new(summary.degradation).set_alignment(CellAlignment::Right),
            Cell::new(summary.savings()).set_alignment(CellAlignment::Right).fg(
                if summary.savings() >= Cost::ZERO { Color::Green } else { Color::Red },
            ),
        ]);
    }
    table.add_row(vec![
        Cell::new("Gap").add_attribute(Attribute::Dim),
        Cell::new(""),
        Cell::new(""),
        Cell::new(optimal_summary.savings() - realized_summary.savings())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
    ]);
    table
}
