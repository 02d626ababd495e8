//! Light sensor trait and illuminance value type

use core::fmt;

/// Sensor counts per lux, times ten
///
/// The BH1750 datasheet specifies 1.2 counts per lux at the default
/// measurement time. Kept as an integer so conversion needs no float math.
const COUNTS_PER_LUX_X10: u32 = 12;

/// Illuminance with 0.1 lux resolution
///
/// Stored as tenths of a lux (e.g., 2500 = 250.0 lx), in the same
/// fixed-point style as the other sensor readings in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lux(u32);

impl Lux {
    /// Zero illuminance
    pub const ZERO: Self = Self(0);

    /// Largest value a 16-bit sample can produce (54612.5 lx)
    pub const MAX: Self = Self::from_raw(u16::MAX);

    /// Convert a raw 16-bit sample to lux, rounded to one decimal
    ///
    /// `lux = raw / 1.2`. In tenths that is `raw * 100 / 12`, rounded
    /// half-up. The quotient's fractional part is always 0, 1/3 or 2/3, so
    /// half-up and half-to-even agree.
    pub const fn from_raw(raw: u16) -> Self {
        let scaled = raw as u32 * 10 * 10;
        Self((scaled + COUNTS_PER_LUX_X10 / 2) / COUNTS_PER_LUX_X10)
    }

    /// Build from tenths of a lux
    pub const fn from_deci_lux(deci_lux: u32) -> Self {
        Self(deci_lux)
    }

    /// Value in tenths of a lux
    pub const fn deci_lux(self) -> u32 {
        self.0
    }

    /// Whole lux, truncated
    pub const fn whole_lux(self) -> u32 {
        self.0 / 10
    }

    /// Value in lux as a float
    pub fn as_f32(self) -> f32 {
        self.0 as f32 / 10.0
    }
}

impl fmt::Display for Lux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Trait for ambient light sensors
///
/// Implementations handle the part-specific protocol (BH1750, ...).
pub trait LightSensor {
    /// Error type for a failed reading
    type Error;

    /// Take a reading with the sensor's default mode
    ///
    /// Takes `&mut self` because bus access requires mutable access.
    fn read_lux(&mut self) -> Result<Lux, Self::Error>;
}
