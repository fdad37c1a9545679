// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod reading;
pub mod registers;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From config.rs
pub use config::{CompletionPolicy, MagConfig};

// From error.rs
pub use error::MagError;

// From hal_traits.rs
pub use hal_traits::{BusTransport, Clock, TransferClient, TransferStatus};

// From reading.rs
pub use reading::{decode, MagneticField, Reading, OVERFLOW_SENTINEL};

// From registers.rs
pub use registers::{DataOutputRate, Gain, MeasurementMode, OperatingMode, SamplesAveraged};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.
