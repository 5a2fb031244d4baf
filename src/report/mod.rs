//! Report assembly and rendering.

pub mod builder;
pub mod generator;

pub use builder::build_report;
pub use generator::*;
