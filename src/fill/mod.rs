//! Connected-region recoloring for the fill tool.

pub mod flood;

pub use flood::{FillOutcome, flood_fill};
