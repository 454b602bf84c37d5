//! MDIO (Management Data Input/Output) bus abstraction
//!
//! This module defines the contract between the PHY driver and the
//! underlying two-wire management bus, plus the IEEE 802.3 Clause 22
//! standard register definitions shared by all PHY chips.
//!
//! The driver never touches hardware directly: every operation is a
//! sequence of [`MdioBus`] transactions issued at the handle's bus
//! address. The transport is supplied and owned by the caller - an MCU's
//! MAC-integrated SMI block, a bit-banged GPIO implementation, or a mock
//! for host-side testing.

use crate::error::Result;

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends, allowing the PHY
/// driver to work with various MDIO implementations.
///
/// All operations are synchronous and blocking. Transactions are atomic
/// at the transport layer, but the driver provides no atomicity across
/// multiple transactions - callers requiring concurrent access must
/// serialize externally.
pub trait MdioBus {
    /// Prepare the bus for use
    ///
    /// Called once at the start of PHY initialization. The default
    /// implementation does nothing; transports with one-time setup
    /// (clock dividers, pin muxing) override it. Any internal failure
    /// stays at the transport layer - this call cannot fail.
    fn init(&mut self) {}

    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

// =============================================================================
// PHY Register Definitions (IEEE 802.3 standard registers)
// =============================================================================

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: u8 = 4;
    /// Auto-Negotiation Link Partner Ability Register
    pub const ANLPAR: u8 = 5;
    /// Auto-Negotiation Expansion Register
    pub const ANER: u8 = 6;
}

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Soft reset - self-clearing
    pub const RESET: u16 = 1 << 15;
    /// Loopback mode
    pub const LOOPBACK: u16 = 1 << 14;
    /// Speed select (100 Mbps if set, 10 Mbps if clear)
    pub const SPEED_100: u16 = 1 << 13;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Power down
    pub const POWER_DOWN: u16 = 1 << 11;
    /// Isolate PHY from MII/RMII
    pub const ISOLATE: u16 = 1 << 10;
    /// Restart auto-negotiation - self-clearing
    pub const AN_RESTART: u16 = 1 << 9;
    /// Duplex mode (full duplex if set)
    pub const DUPLEX_FULL: u16 = 1 << 8;
}

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// 100BASE-T4 capable
    pub const T4_CAPABLE: u16 = 1 << 15;
    /// 100BASE-TX full duplex capable
    pub const TX_FD_CAPABLE: u16 = 1 << 14;
    /// 100BASE-TX half duplex capable
    pub const TX_HD_CAPABLE: u16 = 1 << 13;
    /// 10BASE-T full duplex capable
    pub const T10_FD_CAPABLE: u16 = 1 << 12;
    /// 10BASE-T half duplex capable
    pub const T10_HD_CAPABLE: u16 = 1 << 11;
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 5;
    /// Remote fault detected
    pub const REMOTE_FAULT: u16 = 1 << 4;
    /// Auto-negotiation ability
    pub const AN_ABILITY: u16 = 1 << 3;
    /// Link status (1 = link up, 0 = link down)
    pub const LINK_STATUS: u16 = 1 << 2;
    /// Jabber condition detected
    pub const JABBER_DETECT: u16 = 1 << 1;
    /// Extended register capabilities
    pub const EXT_CAPABLE: u16 = 1 << 0;
}

/// ANAR (Auto-Negotiation Advertisement Register) bits
pub mod anar {
    /// Next page
    pub const NEXT_PAGE: u16 = 1 << 15;
    /// Remote fault
    pub const REMOTE_FAULT: u16 = 1 << 13;
    /// Pause capable
    pub const PAUSE: u16 = 1 << 10;
    /// 100BASE-TX full duplex
    pub const TX_FD: u16 = 1 << 8;
    /// 100BASE-TX half duplex
    pub const TX_HD: u16 = 1 << 7;
    /// 10BASE-T full duplex
    pub const T10_FD: u16 = 1 << 6;
    /// 10BASE-T half duplex
    pub const T10_HD: u16 = 1 << 5;
    /// Selector field mask
    pub const SELECTOR: u16 = 0x001F;
    /// IEEE 802.3 selector value - must always be set when advertising
    pub const SELECTOR_IEEE802_3: u16 = 0x0001;
}

// =============================================================================
// Unit Tests
// =============================================================================
