use std::path::PathBuf;

use chrono::TimeDelta;
use clap::{Parser, ValueEnum};
use reynard::core::{
    battery::BatteryState,
    controller::RuleController,
    scenario::Scenario,
    schedule::Schedule,
    solver::Solver,
    synthesizer::Synthesizer,
    trajectory::{Summary, Trajectory},
};
use serde::Serialize;

use crate::{
    cli::{battery::BatteryArgs, prelude::*, solver::SolverArgs, synthesizer::SynthesizerArgs},
    tables::{build_comparison_table, build_trajectory_table},
};

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
pub struct HuntArgs {
    /// Scenario CSV: `timestamp,generation,demand,tariff_import,tariff_export`.
    #[clap(long, env = "SCENARIO")]
    pub scenario: PathBuf,

    /// Interval length in minutes [default: inferred from the timestamps].
    #[clap(long = "resolution-minutes", env = "RESOLUTION_MINUTES")]
    pub resolution_minutes: Option<i64>,

    #[clap(long, value_enum, default_value = "table", env = "FORMAT")]
    pub format: Format,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub solver: SolverArgs,

    #[clap(flatten)]
    pub synthesizer: SynthesizerArgs,
}

#[derive(Serialize)]
struct Report<'a> {
    optimal: &'a Trajectory,
    optimal_summary: Summary,
    schedule: &'a Schedule,
    realized: &'a Trajectory,
    realized_summary: Summary,
}

#[instrument(skip_all)]
pub fn hunt(args: &HuntArgs) -> Result {
    let scenario = Scenario::from_path(&args.scenario, args.resolution_minutes.map(TimeDelta::minutes))
        .with_context(|| format!("failed to load `{}`", args.scenario.display()))?;
    info!(n_intervals = scenario.len(), resolution = ?scenario.resolution(), "loaded the scenario");

    let battery = args.battery.status()?;
    let solver = Solver::builder()
        .scenario(&scenario)
        .battery(battery.parameters())
        .initial_soc(battery.state_of_charge())
        .grid_resolution(args.solver.grid_resolution)
        .snapping(args.solver.snapping)
        .terminal_condition(args.solver.terminal_condition())
        .maybe_grid_import_limit(args.solver.grid_import_limit)
        .minimize_activity(args.solver.minimize_activity)
        .prioritize_early_charge(args.solver.prioritize_early_charge)
        .build();
    info!(state_space_size = solver.state_space_size(), "optimizing…");
    let optimal = solver.solve().context("failed to optimize the battery trajectory")?;
    info!(total_cost = ?optimal.total_cost(), baseline = ?solver.baseline(), "optimized");

    let controller_kinds = args.synthesizer.controller_kinds();
    ensure!(!controller_kinds.is_empty(), "at least one controller is required");
    let controllers: Vec<RuleController> = controller_kinds
        .into_iter()
        .map(|kind| kind.instantiate(&scenario, battery.parameters()))
        .collect();
    let schedule = Synthesizer::builder()
        .scenario(&scenario)
        .trajectory(&optimal)
        .battery(battery.parameters())
        .controllers(&controllers)
        .maybe_tolerance(args.synthesizer.tolerance())
        .max_gap_length(args.synthesizer.max_gap_length)
        .fill_individual_gaps(args.synthesizer.fill_individual_gaps)
        .build()
        .synthesize()
        .context("failed to synthesize the schedule")?;
    info!(n_entries = schedule.entries().len(), "synthesized");

    let realized = schedule.replay(&scenario, &battery, &controllers)?;
    info!(
        optimal = ?optimal.total_cost(),
        realized = ?realized.total_cost(),
        gap = ?(realized.total_cost() - optimal.total_cost()),
        "replayed",
    );

    match args.format {
        Format::Table => {
            println!(
                "{}",
                build_trajectory_table(&scenario, battery.parameters(), &optimal, &schedule, &realized)
            );
            println!("{schedule}");
            println!("{}", build_comparison_table(&optimal, &realized));
        }
        Format::Json => {
            let report = Report {
                optimal: &optimal,
                optimal_summary: optimal.summary(),
                schedule: &schedule,
                realized: &realized,
                realized_summary: realized.summary(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
