//! Link configuration types for the KSZ8041 PHY driver

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// Loopback test mode
///
/// Selects which loopback path [`set_loopback`](crate::PhyDriver::set_loopback)
/// controls. The mode is not persisted by the driver - it only selects the
/// register and bit the operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopMode {
    /// Local (digital) loopback: TX data is routed back to RX inside the
    /// chip, bypassing the wire
    Local,
    /// Remote loopback: data received from the link partner is echoed
    /// back across the link
    Remote,
}
