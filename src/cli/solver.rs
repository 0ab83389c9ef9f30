use clap::Parser;
use reynard::{
    core::solver::{Snapping, TerminalCondition},
    quantity::{power::Watts, ratios::Percentage},
};

#[derive(Parser)]
pub struct SolverArgs {
    /// State-of-charge grid step of the optimizer.
    #[clap(long = "grid-resolution-percent", default_value = "1", env = "GRID_RESOLUTION_PERCENT")]
    pub grid_resolution: Percentage,

    /// How to value the states of charge between the grid levels.
    #[clap(long, value_enum, default_value = "nearest", env = "SNAPPING")]
    pub snapping: Snapping,

    /// Require the battery to end up at least at this state of charge.
    #[clap(long = "final-state-of-charge-percent", env = "FINAL_STATE_OF_CHARGE_PERCENT")]
    pub final_state_of_charge: Option<Percentage>,

    /// Allow the battery to end up at any state of charge.
    #[clap(long, conflicts_with = "final_state_of_charge")]
    pub free_final_state_of_charge: bool,

    /// Maximum power drawn from the grid, battery included.
    #[clap(long = "grid-import-limit-watts", env = "GRID_IMPORT_LIMIT_WATTS")]
    pub grid_import_limit: Option<Watts>,

    /// Stay idle unless moving the battery gains noticeably.
    #[clap(long, env = "MINIMIZE_ACTIVITY")]
    pub minimize_activity: bool,

    /// Charge as early as possible when the cost is the same.
    #[clap(long, env = "PRIORITIZE_EARLY_CHARGE")]
    pub prioritize_early_charge: bool,
}

impl SolverArgs {
    pub const fn terminal_condition(&self) -> TerminalCondition {
        match (self.free_final_state_of_charge, self.final_state_of_charge) {
            (true, _) => TerminalCondition::Free,
            (false, Some(state_of_charge)) => TerminalCondition::AtLeast(state_of_charge),
            (false, None) => TerminalCondition::AtLeastInitial,
        }
    }
}
