#![forbid(unsafe_code)]

mod sliders;
mod state;
mod types;

pub use sliders::*;
pub use state::*;
pub use types::*;
