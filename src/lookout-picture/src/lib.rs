#![deny(rust_2018_idioms)]

//! Maintains a live maritime picture: ingests vessel snapshots, estimates current positions,
//! flags vessels that went dark and reduces the result to a render set for a map viewport.

pub mod alerts;
pub mod cluster;
pub mod coverage;
pub mod demo;
pub mod error;
pub mod estimator;
pub mod executor;
pub mod picture;
pub mod processor;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod source;
pub mod startup;

pub use alerts::*;
pub use cluster::*;
pub use coverage::*;
pub use demo::*;
pub use estimator::*;
pub use executor::*;
pub use picture::*;
pub use processor::*;
pub use scheduler::*;
pub use source::*;
