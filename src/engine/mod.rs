pub mod controller;
pub mod driver;

pub use controller::{TickOutcome, ZoomEngine};
pub use driver::ZoomRuntime;
