//! Reflected binary (Gray) code.
//!
//! Successive integers differ in exactly one bit once encoded, so a sampler
//! in a foreign domain can only ever catch one bit mid-transition. The worst
//! it can observe is the previous or the next value, never a torn one.

use core::fmt;

/// A Gray-coded pointer snapshot.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct GrayCode(u32);

static_assertions::assert_eq_size!(GrayCode, u32);

impl GrayCode {
    pub const ZERO: Self = Self(0);

    /// Bit `i` of the code is `bin[i] ^ bin[i + 1]`; the top bit passes through.
    #[inline(always)]
    pub const fn encode(bin: u32) -> Self {
        Self(bin ^ (bin >> 1))
    }

    /// Bit `i` of the result is the XOR of all code bits from `i` to the top.
    #[inline(always)]
    pub const fn decode(self) -> u32 {
        let mut bin = self.0;
        let mut shift = 1;
        while shift < u32::BITS {
            bin ^= bin >> shift;
            shift <<= 1;
        }
        bin
    }

    /// Reinterprets raw bits (e.g. from a published atomic) as a code.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Hamming distance between two codes.
    #[inline(always)]
    pub const fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Debug for GrayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GrayCode({:#b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let expected = [0b000, 0b001, 0b011, 0b010, 0b110, 0b111, 0b101, 0b100];
        for (bin, code) in expected.iter().enumerate() {
            assert_eq!(GrayCode::encode(bin as u32).bits(), *code);
            assert_eq!(GrayCode::from_bits(*code).decode(), bin as u32);
        }
    }

    #[test]
    fn test_wrap_is_single_bit() {
        // A 4-bit counter wrapping 15 -> 0 still flips exactly one bit.
        assert_eq!(GrayCode::encode(15).distance(GrayCode::encode(0)), 1);
    }
}

#[cfg(kani)]
mod proofs {
    use super::*;

    #[kani::proof]
    fn prove_gray_round_trip() {
        let v: u32 = kani::any();
        assert_eq!(GrayCode::encode(v).decode(), v);
    }

    #[kani::proof]
    fn prove_gray_unit_distance() {
        let v: u32 = kani::any();
        kani::assume(v < u32::MAX);
        assert_eq!(GrayCode::encode(v).distance(GrayCode::encode(v + 1)), 1);
    }
}
