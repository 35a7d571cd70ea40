//! Admin console gate.

mod errors;
mod gate;
mod models;
mod token;

pub use errors::*;
pub use gate::*;
pub use models::*;
pub use token::*;
