pub mod back;
pub mod bit;
pub mod blinky;
pub mod component;
pub mod domain;
pub mod error;
pub mod platform;
pub mod simulation;
pub mod unsigned;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::{
        back::{rtlil, verilog},
        bit::Bit,
        blinky::Blinky,
        component::{Component, Flow, Member, Signature},
        domain::{hz_to_period, ClockDomain, Polarity, SyncKind},
        platform::{Capability, Platform},
        simulation::Simulate,
        unsigned::Unsigned,
    };
}
