//! Domain models for the medstock system.

mod medicine;
mod status;
mod summary;

pub use medicine::*;
pub use status::*;
pub use summary::*;
