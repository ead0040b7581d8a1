/// Number of bits needed to hold `n` (at least 1).
pub const fn clog2(n: u64) -> u128 {
    if n == 0 {
        return 1;
    }

    let mut c = 0;
    let mut v: u128 = 1;
    while v <= n as u128 {
        c += 1;
        v <<= 1;
    }
    c
}

/// Number of bits needed to index `len` distinct values (at least 1).
pub const fn clog2_len(len: u64) -> u128 {
    if len == 0 {
        1
    } else {
        clog2(len - 1)
    }
}

pub const fn mask(n: u128) -> u128 {
    assert!(n <= 128);
    if n == 128 {
        u128::MAX
    } else {
        (1 << n) - 1
    }
}
