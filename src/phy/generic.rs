//! Generic PHY Driver Trait
//!
//! This module defines the common interface for Ethernet PHY drivers so
//! that calling code can stay chip-agnostic. Each chip driver supplies
//! its own register map and bit semantics behind this surface.

use crate::config::{Duplex, LoopMode, Speed};
use crate::error::Result;
use crate::mdio::MdioBus;

// =============================================================================
// Link Status
// =============================================================================

/// Ethernet link status information
///
/// Contains the negotiated or configured link parameters. Both fields are
/// decoded from the same register snapshot, so they are always mutually
/// consistent for that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 100 Mbps Half Duplex
    pub const fn fast_half() -> Self {
        Self::new(Speed::Mbps100, Duplex::Half)
    }

    /// 10 Mbps Full Duplex
    pub const fn slow_full() -> Self {
        Self::new(Speed::Mbps10, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }
}

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Trait for Ethernet PHY drivers
///
/// This trait defines the uniform capability surface shared by all chip
/// drivers: initialization, raw register access, link inspection, and
/// loopback control. Callers holding a `dyn`-free generic bound can swap
/// chip models without touching call sites.
///
/// Implementations hold no mutable state beyond the bus address - all
/// link state lives on the chip and is queried live, one bus transaction
/// per read. A returned value is a snapshot and may already be stale by
/// the time the caller uses it.
pub trait PhyDriver {
    /// Get the PHY bus address (0-31)
    fn address(&self) -> u8;

    /// Initialize the PHY
    ///
    /// Performs the chip-specific bring-up sequence: presence check, soft
    /// reset, advertisement setup, and auto-negotiation with a bounded
    /// polling wait. Safe to call repeatedly, but each call briefly drops
    /// the link while negotiation restarts.
    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()>;

    /// Write a PHY register
    ///
    /// Pure passthrough: one write transaction at this PHY's address.
    /// The register number is not range-checked.
    fn write_register<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        reg_addr: u8,
        value: u16,
    ) -> Result<()>;

    /// Read a PHY register
    ///
    /// Pure passthrough: one read transaction at this PHY's address.
    fn read_register<M: MdioBus>(&self, mdio: &mut M, reg_addr: u8) -> Result<u16>;

    /// Check if the link is up
    ///
    /// Single-shot read of the basic status register; no retry.
    fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<bool>;

    /// Get the current link speed and duplex mode
    ///
    /// Both fields are decoded from one register snapshot.
    fn link_speed_duplex<M: MdioBus>(&self, mdio: &mut M) -> Result<LinkStatus>;

    /// Enable or disable a loopback test mode
    ///
    /// `speed` selects the forced link speed for local loopback; it is
    /// ignored for remote loopback and when disabling.
    fn set_loopback<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        mode: LoopMode,
        speed: Speed,
        enable: bool,
    ) -> Result<()>;
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
///
/// These work on any Clause 22 compliant PHY and are shared by chip
/// drivers for the portions of their sequences that are not
/// vendor-specific.
pub mod ieee802_3 {
    use super::*;
    use crate::mdio::{bmsr, phy_reg};

    /// Read BMSR and check the link status bit
    pub fn is_link_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
    }

    /// Read BMSR and check the auto-negotiation complete bit
    pub fn is_an_complete<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::AN_COMPLETE) != 0)
    }

    /// Read the PHY identifier from PHYIDR1 and PHYIDR2
    ///
    /// Returns a 32-bit value: `(PHYIDR1 << 16) | PHYIDR2`
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
        let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
        Ok((id1 << 16) | id2)
    }
}
