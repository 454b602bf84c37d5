//! Ethernet PHY Drivers
//!
//! This module provides a generic PHY driver trait and the KSZ8041
//! implementation.
//!
//! # Architecture
//!
//! The PHY layer is independent of any MAC implementation, communicating
//! only through the [`MdioBus`](crate::mdio::MdioBus) interface. This
//! allows:
//!
//! - Reuse across different MAC implementations
//! - Easy addition of new PHY drivers behind the same capability surface
//! - Testing with mock MDIO implementations
//!
//! # Supported PHY Chips
//!
//! - [`Ksz8041`]: Micrel/Microchip KSZ8041 10/100 PHY
//!
//! # Example
//!
//! ```ignore
//! use ksz8041_phy::{Ksz8041, PhyDriver};
//!
//! // Your MdioBus implementation (MAC SMI block, bit-banged GPIO, ...)
//! let mut mdio = /* your MdioBus implementation */;
//!
//! // Create PHY driver at address 0
//! let mut phy = Ksz8041::new(0);
//!
//! // Initialize: verifies the chip ID, resets, and runs auto-negotiation
//! phy.init(&mut mdio)?;
//!
//! if phy.link_status(&mut mdio)? {
//!     let link = phy.link_speed_duplex(&mut mdio)?;
//!     println!("Link up: {:?}", link);
//! }
//! ```

pub mod generic;
pub mod ksz8041;

pub use generic::{LinkStatus, PhyDriver};
pub use ksz8041::{Ksz8041, Ksz8041WithReset};
