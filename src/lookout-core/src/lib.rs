#![deny(rust_2018_idioms)]

//! Domain types, ports and spherical-earth helpers shared by the lookout crates.

mod domain;
mod error;
mod geodesy;
mod ports;

pub use domain::*;
pub use error::*;
pub use geodesy::*;
pub use ports::*;
