// Application layer - the calling side of the store.
// Forms validate raw input into entities, filters and reports shape reads
// for display.

pub mod error;
pub mod filter;
pub mod forms;
pub mod reporting;

pub use error::*;
pub use filter::*;
pub use forms::*;
pub use reporting::*;
