//! GF(2^8) arithmetic with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
//! and generator α = 2.
//!
//! Log/antilog tables are built at compile time. The antilog table is doubled
//! so `EXP[log a + log b]` never needs a modulo.

/// Primitive polynomial, including the x^8 term.
pub const PRIMITIVE: u16 = 0x11D;

const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    (exp, log)
}

const TABLES: ([u8; 512], [u8; 256]) = build_tables();

/// Antilog table: `EXP[i] = α^i`.
pub const EXP: [u8; 512] = TABLES.0;

/// Log table: `LOG[α^i] = i`. `LOG[0]` is unused.
pub const LOG: [u8; 256] = TABLES.1;

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
}

/// `a / b`. `b` must be non-zero.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    debug_assert!(b != 0, "division by zero in GF(2^8)");
    if a == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + 255 - LOG[b as usize] as usize]
}

/// α^n.
#[inline]
pub fn alpha_pow(n: usize) -> u8 {
    EXP[n % 255]
}

/// α^-n.
#[inline]
pub fn alpha_pow_neg(n: usize) -> u8 {
    EXP[(255 - n % 255) % 255]
}

/// Multiply two polynomials (coefficient order is preserved).
pub fn poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; p.len() + q.len() - 1];
    for (i, &a) in p.iter().enumerate() {
        for (j, &b) in q.iter().enumerate() {
            out[i + j] ^= mul(a, b);
        }
    }
    out
}

/// Evaluate a polynomial stored highest degree first.
pub fn eval_high_first(poly: &[u8], x: u8) -> u8 {
    poly.iter().fold(0u8, |acc, &coef| mul(acc, x) ^ coef)
}

/// Evaluate a polynomial stored lowest degree first.
pub fn eval_low_first(poly: &[u8], x: u8) -> u8 {
    poly.iter().rev().fold(0u8, |acc, &coef| mul(acc, x) ^ coef)
}
