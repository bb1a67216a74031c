//! Conversion of accumulated coverage into 8-bit alpha
//!
//! Coverage is 16.16 fixed point where [`FIXED1`] is full coverage.
//! Shifting right by 8 maps `0 ..= FIXED1` onto `0 ..= 256`.
//!
//! Even-odd coverage is a triangle wave of period `2 * FIXED1`. It is
//! computed from the low 17 and low 16 bits of the coverage, which relies
//! on two's complement wraparound for negative values:
//!
//! ```text
//!   alpha = |(mod16 << 1) - mod17| >> 8
//! ```

use crate::lanes::Lanes;
use crate::Fixed;
use crate::FIXED1;

const MASK16: i32 = 0xffff;
const MASK17: i32 = 0x1ffff;

/// Alpha for `coverage` under the even-odd or non-zero winding rule
#[inline(always)]
pub fn coverage_to_alpha(coverage: Fixed, even_odd: bool, inverse: bool) -> u8 {
    let result = if even_odd {
        let mod17 = coverage & MASK17;
        let mod16 = coverage & MASK16;
        ((mod16 << 1) - mod17).wrapping_abs() >> 8
    } else {
        coverage.wrapping_abs() >> 8
    };
    let result = result.clamp(0, 255) as u8;
    if inverse { 255 - result } else { result }
}

/// Alpha for the coverage of a convex path
///
/// Convex coverage never leaves `[-FIXED1, FIXED1]`, so there is no even-odd
/// case and no clamp. Only full coverage needs to be pulled from 256 to 255.
#[inline(always)]
pub fn convex_coverage_to_alpha(coverage: Fixed, inverse: bool) -> u8 {
    debug_assert!(coverage >= -FIXED1 && coverage <= FIXED1,
                  "convex coverage {} out of range", coverage);
    let mut result = coverage.wrapping_abs() >> 8;
    result -= result >> 8; // 256 to 255
    let result = result as u8;
    if inverse { 255 - result } else { result }
}

/// Lane-generic version of [`coverage_to_alpha`]
#[inline(always)]
pub fn coverage_to_alpha_lanes<T: Lanes>(coverage: T, even_odd: bool, inverse: bool) -> T {
    let result = if even_odd {
        let mod17 = coverage.and(coverage.splat(MASK17));
        let mod16 = coverage.and(coverage.splat(MASK16));
        (mod16 + mod16 - mod17).abs().shr(8)
    } else {
        coverage.abs().shr(8)
    };
    let result = result.min(coverage.splat(255)).max(coverage.splat(0));
    if inverse { coverage.splat(255) - result } else { result }
}

/// Lane-generic version of [`convex_coverage_to_alpha`]
#[inline(always)]
pub fn convex_coverage_to_alpha_lanes<T: Lanes>(coverage: T, inverse: bool) -> T {
    let result = coverage.abs().shr(8);
    let result = result - result.shr(8);
    if inverse { coverage.splat(255) - result } else { result }
}

/// Fill rule and mode used when turning coverage into alpha
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub struct CoverageRule {
    pub even_odd: bool,
    pub inverse: bool,
    /// Coverage is known to stay within one full coverage of zero
    pub convex: bool,
}

impl CoverageRule {
    pub fn new(even_odd: bool, inverse: bool, convex: bool) -> Self {
        CoverageRule { even_odd, inverse, convex }
    }
    pub fn non_zero() -> Self {
        Self::new(false, false, false)
    }
    pub fn even_odd() -> Self {
        Self::new(true, false, false)
    }
    pub fn inverse(self) -> Self {
        CoverageRule { inverse: true, .. self }
    }
    pub fn convex(self) -> Self {
        CoverageRule { convex: true, .. self }
    }
    #[inline(always)]
    pub fn alpha(&self, coverage: Fixed) -> u8 {
        if self.convex {
            convex_coverage_to_alpha(coverage, self.inverse)
        } else {
            coverage_to_alpha(coverage, self.even_odd, self.inverse)
        }
    }
    #[inline(always)]
    pub fn alpha_lanes<T: Lanes>(&self, coverage: T) -> T {
        if self.convex {
            convex_coverage_to_alpha_lanes(coverage, self.inverse)
        } else {
            coverage_to_alpha_lanes(coverage, self.even_odd, self.inverse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_odd_triangle_wave() {
        assert_eq!(coverage_to_alpha(0, true, false), 0);
        assert_eq!(coverage_to_alpha(FIXED1 / 2, true, false), 128);
        assert_eq!(coverage_to_alpha(FIXED1, true, false), 255);
        assert_eq!(coverage_to_alpha(FIXED1 + FIXED1 / 2, true, false), 128);
        assert_eq!(coverage_to_alpha(2 * FIXED1, true, false), 0);
        assert_eq!(coverage_to_alpha(-FIXED1, true, false), 255);
    }

    #[test]
    fn extreme_coverage_does_not_panic() {
        assert_eq!(coverage_to_alpha(i32::MIN, false, false), 0);
        assert_eq!(coverage_to_alpha(i32::MAX, false, false), 255);
        let _ = coverage_to_alpha(i32::MIN, true, false);
        let _ = coverage_to_alpha_lanes(i32::MIN, false, true);
    }
}
