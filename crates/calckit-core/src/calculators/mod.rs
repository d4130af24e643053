//! The individual calculators
//!
//! Each module is a leaf: typed inputs in, a result record or a [`CalcError`]
//! out. None of them share state or call each other.
//!
//! [`CalcError`]: crate::CalcError

pub mod bmi;
pub mod conversion;
pub mod dates;
pub mod discount;
pub mod gst;
pub mod loan;
pub mod percentage;
pub mod profit_loss;
pub mod sip;
