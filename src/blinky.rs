use blinky_const_func::clog2_len;
use blinky_netlist::{
    const_val::ConstVal,
    module::Module,
    node::BinOp,
    sig_ty::NodeTy,
};
use tracing::debug;

use crate::{
    bit::Bit,
    component::{Component, Member, Signature},
    domain::ClockDomain,
    error::{Error, Result},
    platform::Platform,
    simulation::Simulate,
    unsigned::Unsigned,
};

pub const DEFAULT_FREQUENCY: u64 = 25_000_000;

/// Toggles `led` every `frequency / 2` clock cycles, so a full on/off period
/// takes `frequency` cycles. With `frequency` equal to the clock rate the LED
/// blinks at 1 Hz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blinky {
    frequency: u64,
    led: Bit,
    count: Unsigned,
}

impl Blinky {
    pub fn new(frequency: u64) -> Result<Self> {
        if frequency < 2 {
            return Err(Error::InvalidFrequency(frequency));
        }

        let width = clog2_len(frequency / 2);
        Ok(Self {
            frequency,
            led: Bit::default(),
            count: Unsigned::zero(width),
        })
    }

    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Last value of the counter before `led` toggles.
    #[inline]
    pub fn threshold(&self) -> u64 {
        self.frequency / 2 - 1
    }

    #[inline]
    pub fn count_width(&self) -> u128 {
        self.count.width()
    }

    #[inline]
    pub fn led(&self) -> Bit {
        self.led
    }

    #[inline]
    pub fn count(&self) -> Unsigned {
        self.count
    }

    /// One clock edge.
    pub fn tick(&mut self) {
        if self.count == self.threshold() as u128 {
            self.led = !self.led;
            self.count = Unsigned::zero(self.count_width());
        } else {
            self.count = self.count + 1;
        }
    }

    pub fn reset(&mut self) {
        self.led = Bit::default();
        self.count = Unsigned::zero(self.count_width());
    }
}

impl Simulate for Blinky {
    type Value = (Bit, Unsigned);

    fn next(&mut self, _: u64) -> Self::Value {
        let value = (self.led, self.count);
        self.tick();
        value
    }
}

impl Component for Blinky {
    fn signature(&self) -> Signature {
        Signature::new().member(Member::output("led", 1))
    }

    fn elaborate(&self, platform: Option<&Platform>) -> Result<Module> {
        let domain = ClockDomain::for_platform(platform);
        let width = self.count_width();
        debug!(
            frequency = self.frequency,
            width,
            reset_kind = ?domain.reset_kind,
            "elaborating blinky"
        );

        let mut m = Module::new("blinky");
        let clk = m.add_input(domain.clk_name(), NodeTy::Clock)?;
        let rst = m.add_input(domain.rst_name(), NodeTy::Bit)?;

        let zero = m.add_const(ConstVal::zero(width));
        let one = m.add_const(ConstVal::new(1, width));
        let threshold = m.add_const(ConstVal::new(self.threshold().into(), width));
        let off = m.add_const(ConstVal::from(false));

        let count = m.add_dff(
            "count",
            NodeTy::Unsigned(width),
            clk,
            rst,
            zero,
            domain.reset_kind,
            domain.reset_polarity,
        )?;
        let led = m.add_dff(
            "led",
            NodeTy::Bit,
            clk,
            rst,
            off,
            domain.reset_kind,
            domain.reset_polarity,
        )?;

        let at_threshold = m.add_bin_op(BinOp::Eq, count, threshold)?;

        let led_toggled = m.add_bit_not(led)?;
        let led_next = m.add_mux2(at_threshold, led_toggled, led)?;

        let count_inc = m.add_bin_op(BinOp::Add, count, one)?;
        let count_next = m.add_mux2(at_threshold, zero, count_inc)?;

        m.connect_dff(count, count_next)?;
        m.connect_dff(led, led_next)?;
        m.add_output(led, "led")?;

        Ok(m)
    }
}
