mod create_scenario;
pub mod ports;

pub use create_scenario::ScenarioBuilder;
