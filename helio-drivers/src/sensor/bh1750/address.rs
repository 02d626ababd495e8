//! BH1750 bus addresses
//!
//! The ADDR pin selects one of two fixed 7-bit addresses. Which one was
//! found also decides the default measurement mode.

use super::mode::MeasurementMode;

/// 7-bit bus address of a BH1750
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceAddress {
    /// ADDR pin low (or floating)
    AddrLow = 0x23,
    /// ADDR pin high
    AddrHigh = 0x5C,
}

/// Known addresses in detection preference order, with the default mode
/// for each board variant
///
/// When both addresses answer a scan, the first entry wins.
static ADDRESS_TABLE: [(DeviceAddress, MeasurementMode); 2] = [
    (DeviceAddress::AddrHigh, MeasurementMode::ContinuousLowRes),
    (DeviceAddress::AddrLow, MeasurementMode::ContinuousHighRes),
];

impl DeviceAddress {
    /// Raw 7-bit address
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Match a raw address
    pub fn from_addr(addr: u8) -> Option<Self> {
        ADDRESS_TABLE
            .iter()
            .map(|&(address, _)| address)
            .find(|address| address.addr() == addr)
    }

    /// Pick the sensor out of a scan result
    ///
    /// Returns `None` if no known address is present.
    pub fn find(present: &[u8]) -> Option<Self> {
        ADDRESS_TABLE
            .iter()
            .map(|&(address, _)| address)
            .find(|address| present.contains(&address.addr()))
    }

    /// Default measurement mode for the board variant at this address
    pub fn default_mode(self) -> MeasurementMode {
        ADDRESS_TABLE[self.table_index()].1
    }

    /// Position of this address in [`ADDRESS_TABLE`]
    const fn table_index(self) -> usize {
        match self {
            DeviceAddress::AddrHigh => 0,
            DeviceAddress::AddrLow => 1,
        }
    }
}

impl From<DeviceAddress> for u8 {
    fn from(address: DeviceAddress) -> Self {
        address.addr()
    }
}
