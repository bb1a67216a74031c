//! Lane-generic integer arithmetic
//!
//! The coverage conversion kernels are written once against [`Lanes`] and
//! instantiated for a single `i32` or for a [`fearless_simd`] vector such as
//! `i32x8<S>`. Both give identical results lane by lane.

use std::ops::Add;
use std::ops::Sub;

use fearless_simd::i32x8;
use fearless_simd::Simd;
use fearless_simd::SimdBase;

/// Lanes processed at once by the dense coverage kernels
pub const SIMD_WIDTH: usize = 8;

/// Operations needed by the coverage to alpha kernels
///
/// `Add` and `Sub` wrap on overflow for vectors. The kernels never overflow
/// them for a scalar.
pub trait Lanes: Copy + Add<Output = Self> + Sub<Output = Self> {
    /// Broadcast `v` to every lane of a value shaped like `self`
    fn splat(self, v: i32) -> Self;
    fn and(self, other: Self) -> Self;
    /// Arithmetic shift right
    fn shr(self, n: u32) -> Self;
    /// Two's complement absolute value, `i32::MIN` maps to itself
    fn abs(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

impl Lanes for i32 {
    #[inline(always)]
    fn splat(self, v: i32) -> Self {
        v
    }
    #[inline(always)]
    fn and(self, other: Self) -> Self {
        self & other
    }
    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self >> n
    }
    #[inline(always)]
    fn abs(self) -> Self {
        self.wrapping_abs()
    }
    #[inline(always)]
    fn min(self, other: Self) -> Self {
        std::cmp::min(self, other)
    }
    #[inline(always)]
    fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

impl<S: Simd> Lanes for i32x8<S> {
    #[inline(always)]
    fn splat(self, v: i32) -> Self {
        self.simd.splat_i32x8(v)
    }
    #[inline(always)]
    fn and(self, other: Self) -> Self {
        self.simd.and_i32x8(self, other)
    }
    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self.simd.shr_i32x8(self, n)
    }
    #[inline(always)]
    fn abs(self) -> Self {
        // 0 - i32::MIN wraps back to i32::MIN
        let neg = Lanes::splat(self, 0) - self;
        Lanes::max(self, neg)
    }
    #[inline(always)]
    fn min(self, other: Self) -> Self {
        self.simd.min_i32x8(self, other)
    }
    #[inline(always)]
    fn max(self, other: Self) -> Self {
        self.simd.max_i32x8(self, other)
    }
}

/// Load the first [`SIMD_WIDTH`] values of `src`
#[inline(always)]
pub fn load_i32x8<S: Simd>(simd: S, src: &[i32]) -> i32x8<S> {
    i32x8::from_slice(simd, &src[.. SIMD_WIDTH])
}

/// Narrow each lane to its low byte and store the first `dst.len()` lanes
#[inline(always)]
pub fn store_u8<S: Simd>(v: i32x8<S>, dst: &mut [u8]) {
    for (d, &a) in dst.iter_mut().zip(v.as_slice().iter()) {
        *d = a as u8;
    }
}
