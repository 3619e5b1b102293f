pub mod analytics;
mod earning;
mod expense;
mod money;
mod target;

pub use analytics::{CategorySlice, DayHours, DayTotals};
pub use earning::*;
pub use expense::*;
pub use money::*;
pub use target::*;
