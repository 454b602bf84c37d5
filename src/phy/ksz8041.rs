//! KSZ8041 PHY Driver
//!
//! Driver for the Micrel/Microchip KSZ8041 10/100 Ethernet PHY.
//!
//! The KSZ8041 is a single-port 10BASE-T/100BASE-TX transceiver with
//! MII/RMII interfaces, commonly paired with NXP Kinetis and i.MX RT
//! Ethernet MACs.
//!
//! # PHY Address
//!
//! The bus address is configured via the PHYAD strapping pins, latched at
//! power-up. The address passed to [`Ksz8041::new`] must match the strap
//! configuration; every register transaction is issued at that address.
//!
//! # Reset Pin
//!
//! The KSZ8041 has an active-low reset pin (nRST). Soft reset via MDIO is
//! usually sufficient, but hardware reset recovers the chip from unknown
//! states. [`Ksz8041WithReset`] adds support for an
//! `embedded_hal::digital::OutputPin` reset line:
//!
//! ```ignore
//! use ksz8041_phy::{Ksz8041WithReset, PhyDriver};
//!
//! let reset_pin = gpio.into_push_pull_output();
//! let mut phy = Ksz8041WithReset::new(0, reset_pin);
//! phy.hardware_reset(&mut delay)?;
//! phy.init(&mut mdio)?;
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ksz8041_phy::{Ksz8041, LoopMode, PhyDriver, Speed};
//!
//! let mut phy = Ksz8041::new(0);
//! phy.init(&mut mdio)?;
//!
//! if phy.link_status(&mut mdio)? {
//!     let link = phy.link_speed_duplex(&mut mdio)?;
//!     // configure the MAC with link.speed / link.duplex
//! }
//!
//! // Route TX back to RX inside the chip at 100 Mbps
//! phy.set_loopback(&mut mdio, LoopMode::Local, Speed::Mbps100, true)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{Duplex, LoopMode, Speed};
use crate::error::{PhyError, Result};
use crate::mdio::{MdioBus, anar, bmcr, bmsr, phy_reg};

use super::generic::{LinkStatus, PhyDriver, ieee802_3};

// =============================================================================
// KSZ8041 Constants
// =============================================================================

/// KSZ8041 PHY Identifier
///
/// The PHY ID register values:
/// - PHYIDR1 (reg 2): 0x0022 (Micrel OUI)
/// - PHYIDR2 (reg 3): 0x151x (x = revision)
///
/// Full ID: 0x0022151x
pub const KSZ8041_PHY_ID: u32 = 0x0022_1510;
/// PHY ID mask (ignores revision bits)
pub const KSZ8041_PHY_ID_MASK: u32 = 0xFFFF_FFF0;

/// Expected PHYIDR1 contents, polled during initialization to confirm the
/// chip is present and responsive at the configured address
pub const KSZ8041_ID1: u16 = 0x0022;

/// Maximum identification polling iterations during initialization
const ID_MAX_ATTEMPTS: u32 = 100_000;

/// Maximum auto-negotiation polling iterations
const AN_MAX_ATTEMPTS: u32 = 100_000;

/// Hardware reset pulse duration in microseconds (minimum 50µs per datasheet)
const RESET_PULSE_US: u32 = 200;

/// Hardware reset recovery time before MDIO access in microseconds
const RESET_RECOVERY_US: u32 = 1000;

// =============================================================================
// KSZ8041 Vendor-Specific Registers
// =============================================================================

/// KSZ8041 vendor-specific register addresses
pub mod reg {
    /// PHY Control 1 Register
    pub const PHYCTRL1: u8 = 0x1E;
    /// PHY Control 2 Register
    pub const PHYCTRL2: u8 = 0x1F;
}

/// PHY Control 1 Register (0x1E) bits
pub mod ctl1 {
    /// Remote loopback enable
    pub const REMOTE_LOOPBACK: u16 = 1 << 13;
}

/// PHY Control 2 Register (0x1F) bits
pub mod ctl2 {
    /// Operation mode indication mask (bits 4:2, read-only)
    pub const OP_MODE_MASK: u16 = 0x7 << 2;
    /// Operation mode: 10BASE-T Half Duplex
    pub const OP_10_HD: u16 = 0x1 << 2;
    /// Operation mode: 100BASE-TX Half Duplex
    pub const OP_100_HD: u16 = 0x2 << 2;
    /// Operation mode: 10BASE-T Full Duplex
    pub const OP_10_FD: u16 = 0x5 << 2;
    /// Operation mode: 100BASE-TX Full Duplex
    pub const OP_100_FD: u16 = 0x6 << 2;
}

// =============================================================================
// KSZ8041 Driver (without reset pin)
// =============================================================================

/// KSZ8041 PHY Driver
///
/// The driver holds only the bus address; all link state lives on the
/// chip and is read fresh on every query. The MDIO transport is borrowed
/// per call, so one bus can serve several PHY handles as long as the
/// caller serializes access.
///
/// This variant does not include a hardware reset pin. Use
/// [`Ksz8041WithReset`] if you need hardware reset capability.
#[derive(Debug)]
pub struct Ksz8041 {
    /// PHY address (0-31)
    addr: u8,
}

impl Ksz8041 {
    /// Create a new KSZ8041 driver
    ///
    /// # Arguments
    /// * `addr` - PHY address matching the PHYAD strap pins
    pub const fn new(addr: u8) -> Self {
        Self { addr }
    }

    /// Verify this is a KSZ8041 by reading the full PHY ID
    pub fn verify_id<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        let id = ieee802_3::read_phy_id(mdio, self.addr)?;
        Ok((id & KSZ8041_PHY_ID_MASK) == KSZ8041_PHY_ID)
    }

    /// Read the PHY identifier (OUI + model + revision)
    ///
    /// Returns a 32-bit value: `(PHYIDR1 << 16) | PHYIDR2`
    pub fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32> {
        ieee802_3::read_phy_id(mdio, self.addr)
    }
}

impl PhyDriver for Ksz8041 {
    fn address(&self) -> u8 {
        self.addr
    }

    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        // Transport bring-up; failures stay at the transport layer.
        mdio.init();

        // Wait for the chip to answer with its identifier before touching
        // configuration registers. A failed read counts as a non-match;
        // the loop only gives up once the attempt ceiling is exhausted.
        let mut present = false;
        for _ in 0..ID_MAX_ATTEMPTS {
            if mdio.read(self.addr, phy_reg::PHYIDR1).unwrap_or(0) == KSZ8041_ID1 {
                present = true;
                break;
            }
        }
        if !present {
            return Err(PhyError::ChipNotFound.into());
        }

        // Soft reset, then advertise all 10/100 capabilities.
        mdio.write(self.addr, phy_reg::BMCR, bmcr::RESET)?;
        mdio.write(
            self.addr,
            phy_reg::ANAR,
            anar::TX_FD | anar::TX_HD | anar::T10_FD | anar::T10_HD | anar::SELECTOR_IEEE802_3,
        )?;

        // Kick off negotiation and wait for the chip to report completion.
        mdio.write(self.addr, phy_reg::BMCR, bmcr::AN_ENABLE | bmcr::AN_RESTART)?;
        for _ in 0..AN_MAX_ATTEMPTS {
            if let Ok(status) = mdio.read(self.addr, phy_reg::BMSR) {
                if (status & bmsr::AN_COMPLETE) != 0 {
                    return Ok(());
                }
            }
        }
        Err(PhyError::AutoNegotiationTimeout.into())
    }

    fn write_register<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        reg_addr: u8,
        value: u16,
    ) -> Result<()> {
        mdio.write(self.addr, reg_addr, value)
    }

    fn read_register<M: MdioBus>(&self, mdio: &mut M, reg_addr: u8) -> Result<u16> {
        mdio.read(self.addr, reg_addr)
    }

    fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        ieee802_3::is_link_up(mdio, self.addr)
    }

    fn link_speed_duplex<M: MdioBus>(&self, mdio: &mut M) -> Result<LinkStatus> {
        let ctl2_val = mdio.read(self.addr, reg::PHYCTRL2)?;
        let mode = ctl2_val & ctl2::OP_MODE_MASK;

        // Two independent comparisons against the same snapshot; any
        // pattern outside the four defined modes decodes as 10M half.
        let duplex = if mode == ctl2::OP_10_FD || mode == ctl2::OP_100_FD {
            Duplex::Full
        } else {
            Duplex::Half
        };
        let speed = if mode == ctl2::OP_100_HD || mode == ctl2::OP_100_FD {
            Speed::Mbps100
        } else {
            Speed::Mbps10
        };

        Ok(LinkStatus::new(speed, duplex))
    }

    fn set_loopback<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        mode: LoopMode,
        speed: Speed,
        enable: bool,
    ) -> Result<()> {
        match (mode, enable) {
            (LoopMode::Local, true) => {
                // Entering local loopback forces a known control-register
                // state: the whole register is replaced, discarding any
                // previously set control bits.
                let mut value = bmcr::LOOPBACK | bmcr::DUPLEX_FULL;
                if matches!(speed, Speed::Mbps100) {
                    value |= bmcr::SPEED_100;
                }
                mdio.write(self.addr, phy_reg::BMCR, value)
            }
            (LoopMode::Local, false) => {
                // Leaving local loopback restarts negotiation so the link
                // re-establishes normal operating parameters.
                let value = mdio.read(self.addr, phy_reg::BMCR)?;
                mdio.write(
                    self.addr,
                    phy_reg::BMCR,
                    (value & !bmcr::LOOPBACK) | bmcr::AN_RESTART,
                )
            }
            (LoopMode::Remote, true) => {
                let value = mdio.read(self.addr, reg::PHYCTRL1)?;
                mdio.write(self.addr, reg::PHYCTRL1, value | ctl1::REMOTE_LOOPBACK)
            }
            (LoopMode::Remote, false) => {
                let value = mdio.read(self.addr, reg::PHYCTRL1)?;
                mdio.write(self.addr, reg::PHYCTRL1, value & !ctl1::REMOTE_LOOPBACK)
            }
        }
    }
}

// =============================================================================
// KSZ8041 Driver (with reset pin)
// =============================================================================

/// KSZ8041 PHY Driver with Hardware Reset Pin
///
/// This variant includes support for hardware reset via an
/// `embedded_hal::digital::OutputPin`. The reset pin is active-low.
///
/// # Example
///
/// ```ignore
/// use ksz8041_phy::{Ksz8041WithReset, PhyDriver};
///
/// let mut phy = Ksz8041WithReset::new(0, reset_pin);
/// phy.hardware_reset(&mut delay)?;
/// phy.init(&mut mdio)?;
/// ```
#[derive(Debug)]
pub struct Ksz8041WithReset<RST: OutputPin> {
    /// Inner PHY driver
    inner: Ksz8041,
    /// Reset pin (active low)
    reset_pin: RST,
}

impl<RST: OutputPin> Ksz8041WithReset<RST> {
    /// Create a new KSZ8041 driver with reset pin
    ///
    /// The reset pin should be configured as a push-pull output.
    /// The pin will be set high (inactive) initially.
    ///
    /// # Arguments
    /// * `addr` - PHY address matching the PHYAD strap pins
    /// * `reset_pin` - Reset pin implementing `OutputPin` (active low)
    pub fn new(addr: u8, mut reset_pin: RST) -> Self {
        // Ensure reset is inactive (high)
        let _ = reset_pin.set_high();
        Self {
            inner: Ksz8041::new(addr),
            reset_pin,
        }
    }

    /// Perform hardware reset of the PHY
    ///
    /// This pulses the reset pin low, then waits for the PHY to recover.
    /// Call this before `init()` if the PHY might be in an unknown state.
    ///
    /// # Timing
    /// - Reset pulse: 200µs (minimum 50µs per datasheet)
    /// - Recovery time: 1ms before the management interface is usable
    pub fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        // Assert reset (low)
        self.reset_pin
            .set_low()
            .map_err(|_| PhyError::ResetPin)?;
        delay.delay_us(RESET_PULSE_US);

        // Deassert reset (high)
        self.reset_pin
            .set_high()
            .map_err(|_| PhyError::ResetPin)?;
        delay.delay_us(RESET_RECOVERY_US);

        Ok(())
    }

    /// Assert reset (hold PHY in reset state)
    ///
    /// The PHY will remain in reset until `deassert_reset()` is called.
    pub fn assert_reset(&mut self) -> Result<()> {
        self.reset_pin.set_low().map_err(|_| PhyError::ResetPin)?;
        Ok(())
    }

    /// Deassert reset (release PHY from reset)
    ///
    /// Wait at least 1ms after this before accessing the PHY via MDIO.
    pub fn deassert_reset(&mut self) -> Result<()> {
        self.reset_pin.set_high().map_err(|_| PhyError::ResetPin)?;
        Ok(())
    }

    /// Get mutable access to the reset pin
    pub fn reset_pin_mut(&mut self) -> &mut RST {
        &mut self.reset_pin
    }

    /// Consume the driver and return the reset pin
    pub fn into_reset_pin(self) -> RST {
        self.reset_pin
    }

    // Forward inner methods

    /// Verify this is a KSZ8041 by reading the full PHY ID
    pub fn verify_id<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        self.inner.verify_id(mdio)
    }

    /// Read the PHY identifier (OUI + model + revision)
    pub fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32> {
        self.inner.phy_id(mdio)
    }
}

impl<RST: OutputPin> PhyDriver for Ksz8041WithReset<RST> {
    fn address(&self) -> u8 {
        self.inner.address()
    }

    fn init<M: MdioBus>(&mut self, mdio: &mut M) -> Result<()> {
        self.inner.init(mdio)
    }

    fn write_register<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        reg_addr: u8,
        value: u16,
    ) -> Result<()> {
        self.inner.write_register(mdio, reg_addr, value)
    }

    fn read_register<M: MdioBus>(&self, mdio: &mut M, reg_addr: u8) -> Result<u16> {
        self.inner.read_register(mdio, reg_addr)
    }

    fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        self.inner.link_status(mdio)
    }

    fn link_speed_duplex<M: MdioBus>(&self, mdio: &mut M) -> Result<LinkStatus> {
        self.inner.link_speed_duplex(mdio)
    }

    fn set_loopback<M: MdioBus>(
        &mut self,
        mdio: &mut M,
        mode: LoopMode,
        speed: Speed,
        enable: bool,
    ) -> Result<()> {
        self.inner.set_loopback(mdio, mode, speed, enable)
    }
}
