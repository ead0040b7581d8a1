use std::fmt::{self, Debug};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTy {
    Bit,
    Unsigned(u128),
    Clock,
}

impl Debug for NodeTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit => f.write_str("bit"),
            Self::Unsigned(n) => write!(f, "unsigned[{n}]"),
            Self::Clock => f.write_str("clock"),
        }
    }
}

impl NodeTy {
    pub fn width(&self) -> u128 {
        match self {
            Self::Bit => 1,
            Self::Unsigned(n) => *n,
            Self::Clock => 1,
        }
    }

    pub fn is_bit(&self) -> bool {
        self.width() == 1
    }
}
