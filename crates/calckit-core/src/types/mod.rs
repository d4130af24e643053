//! Shared value types for calckit calculations

mod calculation;
pub mod unit;

pub use calculation::Calculation;
pub use unit::{Unit, UnitCategory, UnitDef, UNITS};
