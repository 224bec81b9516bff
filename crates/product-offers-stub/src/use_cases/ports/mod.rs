mod collector;
mod server;

pub use collector::Collector;
pub use server::{RunningServer, Server};
