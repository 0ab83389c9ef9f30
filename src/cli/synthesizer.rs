use clap::Parser;
use enumset::EnumSet;
use reynard::{
    core::{controller::ControllerKind, synthesizer::Tolerance},
    quantity::{currency::Cost, power::Watts},
};

#[derive(Parser)]
pub struct SynthesizerArgs {
    /// Candidate controllers, earlier ones win the ties.
    #[clap(
        long = "controllers",
        env = "CONTROLLERS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "do-nothing,solar-self-consumption,static-charge,static-discharge,tariff-threshold,spot-price-arbitrage",
    )]
    pub controllers: Vec<ControllerKind>,

    /// Maximum charge rate deviation from the optimal decision [default: 10% of the charging power].
    #[clap(long = "tolerance-watts", env = "TOLERANCE_WATTS")]
    pub tolerance_watts: Option<Watts>,

    /// Match the controllers by the cost deviation from the optimal decision instead.
    #[clap(long = "tolerance-cost", env = "TOLERANCE_COST", conflicts_with = "tolerance_watts")]
    pub tolerance_cost: Option<Cost>,

    /// Longest run of unmatched intervals which may borrow the neighbouring controllers.
    #[clap(long = "max-gap-length", default_value = "4", env = "MAX_GAP_LENGTH")]
    pub max_gap_length: usize,

    /// Let a controller run through a single interval where it deviates too much.
    #[clap(long, env = "FILL_INDIVIDUAL_GAPS")]
    pub fill_individual_gaps: bool,
}

impl SynthesizerArgs {
    /// Selected controller kinds in the order of precedence, without duplicates.
    #[must_use]
    pub fn controller_kinds(&self) -> Vec<ControllerKind> {
        let mut seen = EnumSet::<ControllerKind>::empty();
        self.controllers.iter().copied().filter(|kind| seen.insert(*kind)).collect()
    }

    #[must_use]
    pub fn tolerance(&self) -> Option<Tolerance> {
        match (self.tolerance_watts, self.tolerance_cost) {
            (_, Some(cost)) => Some(Tolerance::Cost(cost)),
            (Some(rate), None) => Some(Tolerance::ChargeRate(rate)),
            (None, None) => None,
        }
    }
}
