//! KSZ8041 Ethernet PHY Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Micrel/Microchip KSZ8041
//! 10/100 Ethernet PHY, operated over an MDIO-style management bus.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **PHY Layer** ([`phy`]): The [`Ksz8041`] driver and the generic
//!    [`PhyDriver`] capability trait
//! 2. **Bus Layer** ([`mdio`]): The [`MdioBus`] transport contract and
//!    IEEE 802.3 Clause 22 register definitions
//! 3. **Support** ([`error`], [`config`]): Error taxonomy and link types
//!
//! The wire-level bus transport is supplied by the caller: any type
//! implementing [`MdioBus`] works - a MAC's SMI block, a bit-banged GPIO
//! implementation, or a mock for host-side testing. The driver itself
//! holds no mutable state beyond the PHY bus address; every query is a
//! fresh register transaction against the chip.
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3 Clause 22**: basic control/status registers,
//!   auto-negotiation advertisement
//! - **KSZ8041-specific**: PHY Control 1/2 vendor registers for remote
//!   loopback and operation-mode readout
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for driver types and errors
//!
//! # Example
//!
//! ```ignore
//! use ksz8041_phy::{Ksz8041, LoopMode, PhyDriver, Speed};
//!
//! // Your MdioBus implementation (from your HAL or MAC driver)
//! let mut mdio = /* your MdioBus implementation */;
//!
//! // Create PHY driver at the strapped address
//! let mut phy = Ksz8041::new(0);
//!
//! // Bring the chip up: presence check, soft reset, auto-negotiation
//! phy.init(&mut mdio)?;
//!
//! // Inspect the negotiated link
//! if phy.link_status(&mut mdio)? {
//!     let link = phy.link_speed_duplex(&mut mdio)?;
//!     // configure the MAC with link.speed / link.duplex
//! }
//! ```
//!
//! # Concurrency
//!
//! All operations are synchronous, blocking, single-threaded bus
//! transactions. The driver provides no locking; callers sharing a bus
//! or a handle across threads must serialize access externally.

#![no_std]

// =============================================================================
// Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod mdio;
pub mod phy;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Duplex, LoopMode, Speed};
pub use error::{BusError, Error, PhyError, Result};
pub use mdio::MdioBus;
pub use phy::{Ksz8041, Ksz8041WithReset, LinkStatus, PhyDriver};
