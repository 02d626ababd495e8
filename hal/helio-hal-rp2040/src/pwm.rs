//! PWM output for RP2040
//!
//! Each PWM slice has a 16-bit counter and two compare outputs (A/B).
//! The counter always runs the full 0..=0xFFFF range so a compare value
//! equals the 16-bit duty directly; the frequency is set with the slice's
//! 8.4 fixed-point clock divider.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{ChannelAPin, ChannelBPin, Config, Pwm, Slice};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;
use helio_hal::PwmChannel;

/// Counter steps per PWM period (TOP = 0xFFFF)
const COUNTER_STEPS: u64 = 1 << 16;

/// Smallest divider (1.0) in 8.4 fixed point
pub const MIN_DIVIDER_X16: u16 = 0x0010;

/// Largest divider (255.9375) in 8.4 fixed point
pub const MAX_DIVIDER_X16: u16 = 0x0FFF;

/// Calculate the clock divider for a target PWM frequency
///
/// The counter advances at SYS_CLK / divider and wraps every 65536 steps:
/// freq = SYS_CLK / (divider * 65536)
///
/// Therefore: divider = SYS_CLK / (freq * 65536)
///
/// Returns the raw 8.4 fixed-point divider, clamped to the hardware range.
pub fn calc_pwm_divider(sys_clk_hz: u32, freq_hz: u32) -> u16 {
    if freq_hz == 0 {
        return MAX_DIVIDER_X16; // Slowest possible
    }

    let divider_x16 = (sys_clk_hz as u64 * 16) / (freq_hz as u64 * COUNTER_STEPS);
    divider_x16.clamp(MIN_DIVIDER_X16 as u64, MAX_DIVIDER_X16 as u64) as u16
}

/// Slice output a channel drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    A,
    B,
}

/// One output of a PWM slice implementing [`PwmChannel`]
pub struct RpPwmChannel<'d> {
    pwm: Pwm<'d>,
    /// Shadow of the slice registers (the hardware has no read-back API)
    config: Config,
    output: Output,
}

impl<'d> RpPwmChannel<'d> {
    /// Drive output A of `slice` on `pin`
    pub fn new_a<T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelAPin<T>>) -> Self {
        let config = Self::initial_config();
        let pwm = Pwm::new_output_a(slice, pin, config.clone());
        Self {
            pwm,
            config,
            output: Output::A,
        }
    }

    /// Drive output B of `slice` on `pin`
    pub fn new_b<T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelBPin<T>>) -> Self {
        let config = Self::initial_config();
        let pwm = Pwm::new_output_b(slice, pin, config.clone());
        Self {
            pwm,
            config,
            output: Output::B,
        }
    }

    /// Output this channel drives
    pub fn output(&self) -> Output {
        self.output
    }

    fn initial_config() -> Config {
        let mut config = Config::default();
        config.top = u16::MAX;
        config.compare_a = 0;
        config.compare_b = 0;
        config
    }

    fn apply(&mut self) {
        self.pwm.set_config(&self.config);
    }
}

impl PwmChannel for RpPwmChannel<'_> {
    fn set_frequency(&mut self, hz: u32) {
        let divider_bits = calc_pwm_divider(clk_sys_freq(), hz);
        self.config.divider = FixedU16::<U4>::from_bits(divider_bits);

        #[cfg(feature = "defmt")]
        defmt::debug!("PWM {} Hz, divider {}/16", hz, divider_bits);

        self.apply();
    }

    fn duty_u16(&self) -> u16 {
        match self.output {
            Output::A => self.config.compare_a,
            Output::B => self.config.compare_b,
        }
    }

    fn set_duty_u16(&mut self, duty: u16) {
        match self.output {
            Output::A => self.config.compare_a = duty,
            Output::B => self.config.compare_b = duty,
        }
        self.apply();
    }
}
