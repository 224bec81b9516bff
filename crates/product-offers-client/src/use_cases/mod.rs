mod controller;
pub mod forms;
pub mod ports;
mod validation;

pub use controller::{Delivery, FormController, FormKind, Ticket};
