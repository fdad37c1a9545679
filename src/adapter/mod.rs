// src/adapter/mod.rs

// Transport adapters for HAL bus implementations.

pub mod blocking_hal;

pub use blocking_hal::BlockingBus;
