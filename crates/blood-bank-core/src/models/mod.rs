//! Domain models for the blood bank.

mod blood_type;
mod donor;
mod hospital;
mod unit;

pub use blood_type::*;
pub use donor::*;
pub use hospital::*;
pub use unit::*;
