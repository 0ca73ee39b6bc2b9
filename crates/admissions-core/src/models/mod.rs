//! Domain models for the admissions intake form.

mod admission;
mod catalog;
mod consultation;
mod mode;

pub use admission::*;
pub use catalog::*;
pub use consultation::*;
pub use mode::*;
