// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum MagError<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic Bus error
{
    /// Underlying bus error from the transport implementation.
    #[error("Bus error: {0:?}")]
    Bus(E),

    /// The device did not acknowledge its address.
    #[error("Magnetometer not present on the bus")]
    NotPresent,

    /// A configuration register write failed during init.
    #[error("Failed to write configuration register {register:#04x}: {cause:?}")]
    Configuration { register: u8, cause: E },

    /// At least one axis carries the overflow sentinel (-4096).
    #[error("Measurement overflow")]
    Overflow,
}

// Allow mapping from underlying transport error
impl<E: core::fmt::Debug> From<E> for MagError<E> {
    fn from(e: E) -> Self {
        MagError::Bus(e)
    }
}
