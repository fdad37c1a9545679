// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod common;
pub mod driver;

#[cfg(feature = "impl-blocking-hal")]
pub mod adapter;

// Re-export key types for convenience
pub use common::{MagConfig, MagError, Reading};
pub use driver::{DriverStats, Hmc5883l, Presence};
