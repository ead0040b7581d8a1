use std::{
    fmt::{self, Display},
    ops::{Add, Not},
};

use blinky_const_func::mask;

#[derive(Debug, Clone, Copy)]
pub struct ConstVal {
    val: u128,
    width: u128,
}

impl Display for ConstVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'d{}", self.width, self.val())
    }
}

impl Default for ConstVal {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl From<ConstVal> for u128 {
    fn from(value: ConstVal) -> Self {
        value.val
    }
}

impl ConstVal {
    pub fn new(val: u128, width: u128) -> Self {
        assert!(width <= 128);

        let val = val_(val, width);
        Self { val, width }
    }

    pub fn zero(width: u128) -> Self {
        Self::new(0, width)
    }

    #[inline]
    pub fn val(&self) -> u128 {
        val_(self.val, self.width)
    }

    #[inline]
    pub fn width(&self) -> u128 {
        self.width
    }

    pub fn bit(&self, idx: u128) -> bool {
        assert!(idx < self.width);
        (self.val >> idx) & 1 == 1
    }

    /// Binary digits, most significant bit first.
    pub fn to_bitstr(&self) -> String {
        (0 .. self.width)
            .rev()
            .map(|idx| if self.bit(idx) { '1' } else { '0' })
            .collect()
    }

    pub fn eq_bit(self, rhs: ConstVal) -> ConstVal {
        ConstVal::from(self == rhs)
    }
}

fn bin_op(val: u128, lhs: ConstVal, rhs: ConstVal) -> ConstVal {
    let width = op_width(&lhs, &rhs);
    ConstVal::new(val, width)
}

#[inline]
fn op_width(lhs: &ConstVal, rhs: &ConstVal) -> u128 {
    assert_eq!(lhs.width, rhs.width);
    lhs.width
}

fn val_(val: u128, width: u128) -> u128 {
    val & mask(width)
}

impl From<bool> for ConstVal {
    fn from(value: bool) -> Self {
        if value {
            ConstVal::new(1, 1)
        } else {
            ConstVal::new(0, 1)
        }
    }
}

// Values of different widths are never equal.
impl PartialEq for ConstVal {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.val() == other.val()
    }
}

impl Eq for ConstVal {}

impl Not for ConstVal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(!self.val, self.width)
    }
}

// Hardware adders drop the carry out.
impl Add for ConstVal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        bin_op(self.val.wrapping_add(rhs.val), self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_wraps_at_width() {
        let max = ConstVal::new(0b11, 2);
        let one = ConstVal::new(1, 2);

        assert_eq!((max + one).val(), 0);
        assert_eq!((one + one).val(), 2);
    }

    #[test]
    fn not_is_masked() {
        assert_eq!((!ConstVal::new(0b0101, 4)).val(), 0b1010);
        assert_eq!((!ConstVal::from(true)).val(), 0);
    }

    #[test]
    fn bitstr_is_msb_first() {
        assert_eq!(ConstVal::new(0b0110, 4).to_bitstr(), "0110");
        assert_eq!(ConstVal::new(1, 1).to_bitstr(), "1");
        assert_eq!(ConstVal::zero(0).to_bitstr(), "");
    }

    #[test]
    fn display_as_verilog_literal() {
        assert_eq!(ConstVal::new(12_499_999, 24).to_string(), "24'd12499999");
    }

    #[test]
    fn eq_bit() {
        let a = ConstVal::new(3, 4);
        assert_eq!(a.eq_bit(ConstVal::new(3, 4)), ConstVal::from(true));
        assert_eq!(a.eq_bit(ConstVal::new(2, 4)), ConstVal::from(false));
    }

    #[test]
    fn eq_compares_width() {
        assert_ne!(ConstVal::new(1, 2), ConstVal::new(1, 3));
        assert_eq!(ConstVal::new(0b101, 2), ConstVal::new(1, 2));
        assert_eq!(ConstVal::new(1, 2).eq_bit(ConstVal::new(1, 3)), ConstVal::from(false));
    }

    #[test]
    #[should_panic]
    fn add_requires_same_width() {
        let _ = ConstVal::new(1, 2) + ConstVal::new(1, 3);
    }
}
