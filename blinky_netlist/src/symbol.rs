use std::{
    fmt::{self, Arguments, Debug, Display},
    hash::BuildHasherDefault,
};

use lasso::{Capacity, Key, ThreadedRodeo};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashSet, FxHasher};

use crate::index::IndexType;

crate::idx_ty!(Symbol, skip_fmt);

// Verilog keywords that may collide with user-provided names
static RESERVED: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "always", "assign", "begin", "case", "default", "end", "endcase", "endmodule",
        "initial", "inout", "input", "module", "negedge", "output", "posedge", "reg",
        "wire",
    ]
    .into_iter()
    .collect()
});

static INTERNER: Lazy<ThreadedRodeo<Symbol, BuildHasherDefault<FxHasher>>> =
    Lazy::new(|| {
        ThreadedRodeo::with_capacity_and_hasher(
            Capacity::for_strings(32),
            Default::default(),
        )
    });

unsafe impl Key for Symbol {
    #[inline]
    fn into_usize(self) -> usize {
        self.as_usize()
    }

    #[inline]
    fn try_from_usize(int: usize) -> Option<Self> {
        IndexType::try_from_usize(int)
    }
}

impl Debug for Symbol {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Symbol {
    pub fn intern(sym: impl AsRef<str>) -> Self {
        let sym = sym.as_ref();
        if RESERVED.contains(sym) {
            INTERNER.get_or_intern(format!("_{}", sym))
        } else {
            INTERNER.get_or_intern(sym)
        }
    }

    pub fn intern_args(args: Arguments<'_>) -> Self {
        match args.as_str() {
            Some(s) => Self::intern(s),
            None => Self::intern(args.to_string()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interned_symbols_are_shared() {
        let a = Symbol::intern("count");
        let b = Symbol::intern_args(format_args!("{}{}", "co", "unt"));

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "count");
    }

    #[test]
    fn reserved_words_are_escaped() {
        assert_eq!(Symbol::intern("reg").as_str(), "_reg");
        assert_eq!(Symbol::intern("led").as_str(), "led");
    }
}
