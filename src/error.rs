//! Error types for the KSZ8041 PHY driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`BusError`]: MDIO transaction failures, reported by the bus transport
//! - [`PhyError`]: Chip-level bring-up failures detected by the driver
//!
//! The unified [`Error`] enum wraps both domains and is returned by all
//! driver methods. Bus errors pass through the driver verbatim - the
//! driver never reinterprets or retries a failed transaction. The two
//! [`PhyError`] variants are deliberately distinct so callers can tell
//! "no device on the bus" from "device present but negotiation stalled".

// =============================================================================
// Bus Errors
// =============================================================================

/// MDIO bus transaction errors
///
/// Constructed by [`MdioBus`](crate::mdio::MdioBus) implementations when a
/// read or write transaction fails at the wire level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Transaction did not complete in time
    Timeout,
    /// Bus was busy with another transaction
    Busy,
    /// Transaction failed at the wire level
    Io,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BusError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BusError::Timeout => "MDIO transaction timed out",
            BusError::Busy => "MDIO bus busy",
            BusError::Io => "MDIO transaction failed",
        }
    }
}

// =============================================================================
// PHY Errors
// =============================================================================

/// Chip-level errors detected during PHY bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyError {
    /// The identification register never returned the expected chip ID
    /// within the polling bound (no device, or wrong bus address)
    ChipNotFound,
    /// Auto-negotiation never reported completion within the polling
    /// bound (device present, but no link partner or negotiation stalled)
    AutoNegotiationTimeout,
    /// The hardware reset pin could not be driven
    ResetPin,
}

impl core::fmt::Display for PhyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PhyError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhyError::ChipNotFound => "PHY not found",
            PhyError::AutoNegotiationTimeout => "auto-negotiation timed out",
            PhyError::ResetPin => "reset pin could not be driven",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps both domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match phy.init(&mut mdio) {
///     Err(Error::Phy(PhyError::ChipNotFound)) => { /* wrong address? */ }
///     Err(Error::Phy(PhyError::AutoNegotiationTimeout)) => { /* no partner */ }
///     Err(Error::Bus(e)) => { /* transport fault */ }
///     Ok(()) => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// MDIO bus error
    Bus(BusError),
    /// PHY bring-up error
    Phy(PhyError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus: {}", e.as_str()),
            Error::Phy(e) => write!(f, "phy: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Error::Bus(e)
    }
}

impl From<PhyError> for Error {
    fn from(e: PhyError) -> Self {
        Error::Phy(e)
    }
}

/// Result type alias for PHY driver operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================
