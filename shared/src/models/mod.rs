//! Domain models for the Garment Carbon Calculator

mod calculation;
mod item;
mod location;
mod material;

pub use calculation::*;
pub use item::*;
pub use location::*;
pub use material::*;
