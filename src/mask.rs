//! Dense coverage deltas for small shapes

use std::fmt;

use fearless_simd::dispatch;
use fearless_simd::Level;
use fearless_simd::Simd;

use crate::alpha::CoverageRule;
use crate::error::Error;
use crate::lanes::load_i32x8;
use crate::lanes::store_u8;
use crate::lanes::SIMD_WIDTH;
use crate::rect::AntiRect;
use crate::rect::IntRect;
use crate::Fixed;

/// Delta cells available to a single mask
pub const MAX_MASK_SIZE: usize = 2048;

/// Layout of the pixels behind a [`MaskView`]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum MaskFormat {
    /// One byte of alpha per pixel
    A8,
}

/// Borrowed alpha mask, ready to be composited
#[derive(Debug,Copy,Clone)]
pub struct MaskView<'a> {
    pub image: &'a [u8],
    pub bounds: IntRect,
    pub row_bytes: usize,
    pub format: MaskFormat,
}

impl<'a> MaskView<'a> {
    /// Alpha values of row `y`, starting at `bounds.left`
    pub fn row(&self, y: i32) -> &'a [u8] {
        debug_assert!(y >= self.bounds.top && y < self.bounds.bottom);
        let start = (y - self.bounds.top) as usize * self.row_bytes;
        &self.image[start .. start + self.bounds.width() as usize]
    }
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        debug_assert!(x >= self.bounds.left && x < self.bounds.right);
        self.row(y)[(x - self.bounds.left) as usize]
    }
}

/// Coverage deltas stored densely over a small bounding box
///
/// The box is widened by `PADDING` columns on each side, enough for
/// rounding errors and the closing delta at `right + 1`, and each row is
/// rounded up to a multiple of `SIMD_WIDTH`. Everything lives inline so
/// accumulating a shape never touches the heap.
///
/// A mask is used once: deltas are added, then
/// [`convert_coverage_to_alpha`](CoverageDeltaMask::convert_coverage_to_alpha)
/// turns them into alpha in a single pass.
pub struct CoverageDeltaMask {
    level: Level,
    bounds: IntRect,
    expanded_width: i32,
    anti_rect: AntiRect,
    converted: bool,
    // Slack for the full lane loads of the last row
    deltas: [Fixed; MAX_MASK_SIZE + SIMD_WIDTH],
    mask: [u8; MAX_MASK_SIZE],
}

impl CoverageDeltaMask {
    /// One column for precision error, one for the boundary delta at `right + 1`
    pub const PADDING: i32 = 2;
    pub const SIMD_WIDTH: i32 = SIMD_WIDTH as i32;
    pub const SUITABLE_WIDTH: i32 = 32;
    pub const MAX_MASK_SIZE: usize = MAX_MASK_SIZE;

    /// Pad both sides and round up to a multiple of `SIMD_WIDTH`
    ///
    /// Saturates at `i32::MAX` for widths no mask could hold.
    pub fn expand_width(width: i32) -> i32 {
        Self::expand_width_wide(width).min(i64::from(i32::MAX)) as i32
    }
    fn expand_width_wide(width: i32) -> i64 {
        let lanes = i64::from(Self::SIMD_WIDTH);
        let w = i64::from(width) + i64::from(Self::PADDING) * 2;
        w + (lanes - w % lanes) % lanes
    }
    /// Whether the expanded `bounds` fit into `MAX_MASK_SIZE` cells
    pub fn can_handle(bounds: &IntRect) -> bool {
        let cells = Self::expand_width_wide(bounds.width()) * i64::from(bounds.height());
        cells <= MAX_MASK_SIZE as i64
    }
    /// Whether a mask is worth it over a delta list
    pub fn suitable(bounds: &IntRect) -> bool {
        Self::can_handle(bounds)
            && Self::expand_width_wide(bounds.width()) <= i64::from(Self::SUITABLE_WIDTH)
    }

    /// Mask converted with the best SIMD level of this CPU
    pub fn new(bounds: IntRect) -> Self {
        Self::with_level(bounds, Level::new())
    }
    /// Mask converted with an explicit SIMD `level`
    pub fn with_level(bounds: IntRect, level: Level) -> Self {
        debug_assert!(Self::can_handle(&bounds), "mask cannot handle {:?}", bounds);
        CoverageDeltaMask {
            level,
            bounds,
            expanded_width: Self::expand_width(bounds.width()),
            anti_rect: AntiRect::default(),
            converted: false,
            deltas: [0; MAX_MASK_SIZE + SIMD_WIDTH],
            mask: [0; MAX_MASK_SIZE],
        }
    }
    /// Like [`new`](CoverageDeltaMask::new), but refuses bounds that do not fit
    pub fn try_new(bounds: IntRect) -> Result<Self, Error> {
        if !Self::can_handle(&bounds) {
            return Err(Error::MaskTooLarge {
                width: bounds.width(),
                height: bounds.height(),
                max: MAX_MASK_SIZE,
            });
        }
        Ok(Self::new(bounds))
    }

    pub fn top(&self) -> i32 {
        self.bounds.top
    }
    pub fn bottom(&self) -> i32 {
        self.bounds.bottom
    }
    pub fn bounds(&self) -> &IntRect {
        &self.bounds
    }
    pub fn expanded_width(&self) -> i32 {
        self.expanded_width
    }
    /// Alpha values, `bounds.width()` per row; zero until converted
    pub fn get_mask(&self) -> &[u8] {
        &self.mask[.. self.pixels()]
    }

    pub fn add_delta(&mut self, x: i32, y: i32, delta: Fixed) {
        let d = self.delta(x, y);
        *d = d.wrapping_add(delta);
    }
    /// Delta cell for column `x` of row `y`
    pub fn delta(&mut self, x: i32, y: i32) -> &mut Fixed {
        debug_assert!(!self.converted, "mask already converted to alpha");
        let i = self.index(x, y);
        &mut self.deltas[i]
    }

    pub fn anti_rect(&self) -> &AntiRect {
        &self.anti_rect
    }
    pub fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                         left_alpha: u8, right_alpha: u8) {
        self.anti_rect = AntiRect::new(x, y, width, height, left_alpha, right_alpha);
    }

    /// View of the converted alpha, one byte per pixel of `bounds`
    pub fn prepare_mask(&self) -> MaskView<'_> {
        debug_assert!(self.converted, "mask read before conversion");
        MaskView {
            image: self.get_mask(),
            bounds: self.bounds,
            row_bytes: self.bounds.width() as usize,
            format: MaskFormat::A8,
        }
    }

    /// Sum the deltas of each row into coverage and convert it to alpha
    ///
    /// The running sum of a row starts at `bounds.left`; deltas in the left
    /// padding are dropped. With `is_convex` the coverage must stay within
    /// `[-FIXED1, FIXED1]`.
    pub fn convert_coverage_to_alpha(&mut self, is_even_odd: bool, is_inverse: bool, is_convex: bool) {
        debug_assert!(!self.converted, "mask converted twice");
        let rule = CoverageRule::new(is_even_odd, is_inverse, is_convex);
        self.converted = true;
        if self.bounds.width() == 0 {
            return;
        }
        let level = self.level;
        dispatch!(level, simd => self.convert_with(simd, rule));
    }

    fn convert_with<S: Simd>(&mut self, simd: S, rule: CoverageRule) {
        let width = self.bounds.width() as usize;
        let height = self.bounds.height() as usize;
        let expanded = self.expanded_width as usize;
        let anti_rect = self.anti_rect;

        let mut iy = 0;
        while iy < height {
            let y = self.bounds.top + iy as i32;
            if !anti_rect.is_empty() && y == anti_rect.y {
                let rows = (anti_rect.height as usize).min(height - iy);
                for row in self.mask[iy * width .. (iy + rows) * width].chunks_exact_mut(width) {
                    anti_rect.fill_row(row, self.bounds.left);
                }
                iy += rows;
                continue;
            }

            let deltas = &self.deltas[iy * expanded + Self::PADDING as usize ..];
            let alphas = &mut self.mask[iy * width .. (iy + 1) * width];
            let mut coverage: Fixed = 0;
            for ix in (0 .. width).step_by(SIMD_WIDTH) {
                let mut sums = [0; SIMD_WIDTH];
                for (s, &d) in sums.iter_mut().zip(deltas[ix .. ix + SIMD_WIDTH].iter()) {
                    coverage = coverage.wrapping_add(d);
                    *s = coverage;
                }
                let n = SIMD_WIDTH.min(width - ix);
                store_u8(rule.alpha_lanes(load_i32x8(simd, &sums)), &mut alphas[ix .. ix + n]);
            }
            iy += 1;
        }
    }

    fn pixels(&self) -> usize {
        (self.bounds.width() * self.bounds.height()) as usize
    }
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= self.bounds.left - Self::PADDING && x < self.bounds.right + Self::PADDING,
                      "column {} outside {}..{} with padding", x, self.bounds.left, self.bounds.right);
        debug_assert!(y >= self.bounds.top && y < self.bounds.bottom,
                      "row {} outside {}..{}", y, self.bounds.top, self.bounds.bottom);
        ((y - self.bounds.top) * self.expanded_width
         + (x - self.bounds.left + Self::PADDING)) as usize
    }
}

impl fmt::Debug for CoverageDeltaMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageDeltaMask")
            .field("bounds", &self.bounds)
            .field("expanded_width", &self.expanded_width)
            .field("anti_rect", &self.anti_rect)
            .field("converted", &self.converted)
            .finish()
    }
}
