mod parameters;
mod simulator;
mod state;

pub use self::{
    parameters::BatteryParameters,
    simulator::Simulator,
    state::{BatteryState, BatteryStatus},
};
