use std::borrow::Cow;

pub use blinky_netlist::node::{Polarity, SyncKind};

use crate::platform::{Capability, Platform};

/// Picoseconds.
pub const SECOND: u64 = 1_000_000_000_000;
pub const MICROSECOND: u64 = 1_000_000;
pub const NANOSECOND: u64 = 1_000;

/// Clock period in picoseconds, `None` unless `0 < freq <= 1 THz`.
pub const fn hz_to_period(freq: u64) -> Option<u64> {
    if freq == 0 || freq > SECOND {
        None
    } else {
        Some(SECOND / freq)
    }
}

/// Clock domain the synchronous logic of a component is placed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDomain {
    pub name: Cow<'static, str>,
    pub reset_kind: SyncKind,
    pub reset_polarity: Polarity,
}

impl Default for ClockDomain {
    fn default() -> Self {
        Self::sync()
    }
}

impl ClockDomain {
    /// The default domain: synchronous, active high reset.
    pub fn sync() -> Self {
        Self {
            name: "sync".into(),
            reset_kind: SyncKind::Sync,
            reset_polarity: Polarity::ActiveHigh,
        }
    }

    pub fn for_platform(platform: Option<&Platform>) -> Self {
        let mut domain = Self::sync();
        if let Some(platform) = platform {
            if platform.has(Capability::AsyncReset) {
                domain.reset_kind = SyncKind::Async;
            }
            if platform.has(Capability::ResetActiveLow) {
                domain.reset_polarity = Polarity::ActiveLow;
            }
        }

        domain
    }

    fn signal_name(&self, signal: &'static str) -> Cow<'static, str> {
        if self.name == "sync" {
            signal.into()
        } else {
            format!("{}_{signal}", self.name).into()
        }
    }

    pub fn clk_name(&self) -> Cow<'static, str> {
        self.signal_name("clk")
    }

    pub fn rst_name(&self) -> Cow<'static, str> {
        self.signal_name("rst")
    }
}
