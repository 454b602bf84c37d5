//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the PHY driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use crate::error::{BusError, Result};
use crate::mdio::{MdioBus, bmsr, phy_reg};
use crate::phy::ksz8041::reg;

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY drivers without hardware
///
/// Supports preset register values, scripted read sequences, per-register
/// failure injection, and a write log for verifying driver transactions.
/// A failed write is not logged and does not change the register map -
/// the "chip" never saw it.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.setup_ksz8041(0);
/// mdio.simulate_link_up(0);
///
/// let phy = Ksz8041::new(0);
/// assert!(phy.link_status(&mut mdio).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Scripted reads: consumed front-first; the final value sticks
    sequences: RefCell<HashMap<(u8, u8), Vec<u16>>>,
    /// Registers whose reads fail
    read_errors: RefCell<HashMap<(u8, u8), BusError>>,
    /// Registers whose writes fail
    write_errors: RefCell<HashMap<(u8, u8), BusError>>,
    /// Record of successful writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Number of read transactions issued per register
    read_counts: RefCell<HashMap<(u8, u8), usize>>,
    /// Number of times init() was called
    init_calls: RefCell<usize>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Script a sequence of read results for a register
    ///
    /// Successive reads consume the sequence front-first; once exhausted,
    /// the last value remains in the register map. An empty sequence is
    /// ignored.
    pub fn set_register_sequence(&self, phy_addr: u8, reg_addr: u8, values: &[u16]) {
        if values.is_empty() {
            return;
        }
        self.sequences
            .borrow_mut()
            .insert((phy_addr, reg_addr), values.to_vec());
    }

    /// Make all reads of a register fail with the given error
    pub fn fail_read(&self, phy_addr: u8, reg_addr: u8, error: BusError) {
        self.read_errors
            .borrow_mut()
            .insert((phy_addr, reg_addr), error);
    }

    /// Make all writes to a register fail with the given error
    pub fn fail_write(&self, phy_addr: u8, reg_addr: u8, error: BusError) {
        self.write_errors
            .borrow_mut()
            .insert((phy_addr, reg_addr), error);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&(phy_addr, reg_addr)).copied()
    }

    /// Get all successful writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Number of read transactions issued against a register
    pub fn read_count(&self, phy_addr: u8, reg_addr: u8) -> usize {
        self.read_counts
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0)
    }

    /// Number of times the driver initialized the transport
    pub fn init_count(&self) -> usize {
        *self.init_calls.borrow()
    }

    /// Setup a KSZ8041 with default register values, link down
    pub fn setup_ksz8041(&self, phy_addr: u8) {
        // PHY ID registers (Micrel OUI, KSZ8041 model)
        self.set_register(phy_addr, phy_reg::PHYIDR1, 0x0022);
        self.set_register(phy_addr, phy_reg::PHYIDR2, 0x1513);

        // BMSR: basic 10/100 capabilities, link down, AN not complete
        let bmsr_value = bmsr::TX_FD_CAPABLE
            | bmsr::TX_HD_CAPABLE
            | bmsr::T10_FD_CAPABLE
            | bmsr::T10_HD_CAPABLE
            | bmsr::AN_ABILITY
            | bmsr::EXT_CAPABLE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_value);

        // BMCR: auto-neg enabled
        self.set_register(phy_addr, phy_reg::BMCR, 0x1000);

        // Vendor registers quiescent
        self.set_register(phy_addr, reg::PHYCTRL1, 0x0000);
        self.set_register(phy_addr, reg::PHYCTRL2, 0x0000);
    }

    /// Simulate auto-negotiation reporting completion
    pub fn simulate_autoneg_complete(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
    }

    /// Simulate link coming up (negotiation complete)
    pub fn simulate_link_up(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
    }

    /// Simulate link going down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val &= !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
    }
}

impl MdioBus for MockMdioBus {
    fn init(&mut self) {
        *self.init_calls.borrow_mut() += 1;
    }

    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        *self
            .read_counts
            .borrow_mut()
            .entry((phy_addr, reg_addr))
            .or_insert(0) += 1;

        if let Some(err) = self.read_errors.borrow().get(&(phy_addr, reg_addr)) {
            return Err((*err).into());
        }

        // Scripted reads take precedence over the register map
        let scripted = self.sequences.borrow_mut().remove(&(phy_addr, reg_addr));
        if let Some(mut seq) = scripted {
            let value = seq.remove(0);
            if seq.is_empty() {
                // Last scripted value sticks
                self.registers
                    .borrow_mut()
                    .insert((phy_addr, reg_addr), value);
            } else {
                self.sequences
                    .borrow_mut()
                    .insert((phy_addr, reg_addr), seq);
            }
            return Ok(value);
        }

        // Return from register map (default 0 if not set)
        Ok(self
            .registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        if let Some(err) = self.write_errors.borrow().get(&(phy_addr, reg_addr)) {
            return Err((*err).into());
        }

        // Log the write
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));

        // Actually update the register
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);

        Ok(())
    }
}

// =============================================================================
// Test Assertions
// =============================================================================

/// Assert that a register was written with a specific value
#[macro_export]
macro_rules! assert_reg_written {
    ($mdio:expr, $phy:expr, $reg:expr, $value:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes
                .iter()
                .any(|w| w.0 == $phy && w.1 == $reg && w.2 == $value),
            "Expected write to PHY {} reg {} with value 0x{:04X}, but got: {:?}",
            $phy,
            $reg,
            $value,
            writes
        );
    };
}

/// Assert that a register was written (any value)
#[macro_export]
macro_rules! assert_reg_written_any {
    ($mdio:expr, $phy:expr, $reg:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes.iter().any(|w| w.0 == $phy && w.1 == $reg),
            "Expected write to PHY {} reg {}, but got: {:?}",
            $phy,
            $reg,
            writes
        );
    };
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: u64,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Reset the delay counter
    pub fn reset(&mut self) {
        self.total_ns = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// =============================================================================
// Mock Reset Pin
// =============================================================================

/// Recorded output-pin level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinTransition {
    /// Pin driven high
    High,
    /// Pin driven low
    Low,
}

/// Mock active-low reset pin recording every level change
#[derive(Debug, Default)]
pub struct MockResetPin {
    transitions: Vec<PinTransition>,
}

impl MockResetPin {
    /// Create a new mock reset pin
    pub fn new() -> Self {
        Self::default()
    }

    /// All level changes driven so far, oldest first
    pub fn transitions(&self) -> Vec<PinTransition> {
        self.transitions.clone()
    }
}

impl embedded_hal::digital::ErrorType for MockResetPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockResetPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.transitions.push(PinTransition::Low);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.transitions.push(PinTransition::High);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1).unwrap(), 0);

        // Set a value
        mdio.set_register(0, 1, 0x1234);
        assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);

        // Write updates the value
        mdio.write(0, 1, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1).unwrap(), 0x5678);

        // Write is logged
        assert_eq!(mdio.get_writes(), vec![(0, 1, 0x5678)]);
    }

    #[test]
    fn mock_mdio_multiple_phys() {
        let mut mdio = MockMdioBus::new();

        mdio.set_register(0, 1, 0x1111);
        mdio.set_register(1, 1, 0x2222);

        assert_eq!(mdio.read(0, 1).unwrap(), 0x1111);
        assert_eq!(mdio.read(1, 1).unwrap(), 0x2222);
    }

    #[test]
    fn mock_mdio_sequence_consumed_then_sticks() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register_sequence(0, 2, &[0xAAAA, 0xBBBB]);

        assert_eq!(mdio.read(0, 2).unwrap(), 0xAAAA);
        assert_eq!(mdio.read(0, 2).unwrap(), 0xBBBB);
        // Exhausted: last value remains
        assert_eq!(mdio.read(0, 2).unwrap(), 0xBBBB);
        assert_eq!(mdio.read(0, 2).unwrap(), 0xBBBB);
    }

    #[test]
    fn mock_mdio_read_failure_injection() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(0, 1, 0x1234);
        mdio.fail_read(0, 1, BusError::Timeout);

        assert!(mdio.read(0, 1).is_err());
        // Other registers unaffected
        assert_eq!(mdio.read(0, 2).unwrap(), 0);
    }

    #[test]
    fn mock_mdio_write_failure_not_logged() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_write(0, 4, BusError::Io);

        assert!(mdio.write(0, 4, 0x1234).is_err());
        assert!(mdio.get_writes().is_empty());
        // Register map untouched
        assert_eq!(mdio.read(0, 4).unwrap(), 0);
    }

    #[test]
    fn mock_mdio_counts_reads_and_inits() {
        let mut mdio = MockMdioBus::new();
        mdio.init();
        let _ = mdio.read(0, 1);
        let _ = mdio.read(0, 1);

        assert_eq!(mdio.init_count(), 1);
        assert_eq!(mdio.read_count(0, 1), 2);
        assert_eq!(mdio.read_count(0, 2), 0);
    }

    #[test]
    fn mock_mdio_ksz8041_setup() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_ksz8041(0);

        // Check PHY ID
        assert_eq!(mdio.read(0, phy_reg::PHYIDR1).unwrap(), 0x0022);
        assert_eq!(mdio.read(0, phy_reg::PHYIDR2).unwrap(), 0x1513);

        // Check BMSR has capabilities but no link
        let bmsr_val = mdio.read(0, phy_reg::BMSR).unwrap();
        assert!(bmsr_val & bmsr::TX_FD_CAPABLE != 0);
        assert!(bmsr_val & bmsr::LINK_STATUS == 0);
        assert!(bmsr_val & bmsr::AN_COMPLETE == 0);
    }

    #[test]
    fn mock_mdio_link_simulation() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_ksz8041(0);

        // Simulate link up
        mdio.simulate_link_up(0);
        let bmsr_val = mdio.read(0, phy_reg::BMSR).unwrap();
        assert!(bmsr_val & bmsr::LINK_STATUS != 0);
        assert!(bmsr_val & bmsr::AN_COMPLETE != 0);

        // Simulate link down
        mdio.simulate_link_down(0);
        let bmsr_val = mdio.read(0, phy_reg::BMSR).unwrap();
        assert!(bmsr_val & bmsr::LINK_STATUS == 0);
    }

    #[test]
    fn write_assertion_macros() {
        let mut mdio = MockMdioBus::new();
        mdio.write(2, 0, 0x8000).unwrap();

        crate::assert_reg_written!(mdio, 2, 0, 0x8000);
        crate::assert_reg_written_any!(mdio, 2, 0);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);
        assert_eq!(delay.total_ns(), 3000);

        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn mock_reset_pin_records_transitions() {
        use embedded_hal::digital::OutputPin;

        let mut pin = MockResetPin::new();
        pin.set_high().unwrap();
        pin.set_low().unwrap();
        pin.set_high().unwrap();

        assert_eq!(
            pin.transitions(),
            vec![PinTransition::High, PinTransition::Low, PinTransition::High]
        );
    }
}
