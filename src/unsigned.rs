use std::{
    fmt::{self, Debug, Display},
    ops::Add,
};

use blinky_netlist::const_val::ConstVal;

/// Unsigned value of a fixed bit width; arithmetic wraps at the width.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Unsigned(ConstVal);

impl Unsigned {
    pub fn new(val: u128, width: u128) -> Self {
        Self(ConstVal::new(val, width))
    }

    pub fn zero(width: u128) -> Self {
        Self(ConstVal::zero(width))
    }

    #[inline]
    pub fn width(&self) -> u128 {
        self.0.width()
    }

    #[inline]
    pub fn val(&self) -> u128 {
        self.0.val()
    }
}

impl From<Unsigned> for u128 {
    fn from(value: Unsigned) -> Self {
        value.val()
    }
}

impl From<Unsigned> for ConstVal {
    fn from(value: Unsigned) -> Self {
        value.0
    }
}

impl From<ConstVal> for Unsigned {
    fn from(value: ConstVal) -> Self {
        Self(value)
    }
}

impl PartialEq<u128> for Unsigned {
    fn eq(&self, other: &u128) -> bool {
        self.val() == *other
    }
}

impl Add<u128> for Unsigned {
    type Output = Self;

    fn add(self, rhs: u128) -> Self::Output {
        Self::new(self.val().wrapping_add(rhs), self.width())
    }
}

impl Display for Unsigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.val(), f)
    }
}

impl Debug for Unsigned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'d{}", self.width(), self.val())
    }
}
