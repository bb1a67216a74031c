//! Alpha buffer

use std::ops::Index;
use std::ops::IndexMut;
use std::path::Path;

use crate::blit::Blitter;
use crate::error::Error;
use crate::mask::MaskView;
use crate::rect::AntiRect;
use crate::rect::IntRect;

/// 8-bit alpha image
///
/// Data is stored as row-major order (C-format), one byte per pixel, with
/// the origin at `(0, 0)`. As a [`Blitter`] it replaces pixels rather than
/// blending into them and clips everything to its extent.
#[derive(Debug,Default,Clone,PartialEq,Eq)]
pub struct AlphaBuffer {
    /// Alpha of every pixel
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl AlphaBuffer {
    /// Create a new, fully transparent buffer
    pub fn new(width: usize, height: usize) -> Self {
        AlphaBuffer { width, height, data: vec![0u8; width * height] }
    }
    /// Wrap existing row-major alpha data
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height, "alpha data does not match {}x{}", width, height);
        AlphaBuffer { data, width, height }
    }
    /// Size of underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn bounds(&self) -> IntRect {
        IntRect::from_ltrb(0, 0, self.width as i32, self.height as i32)
    }
    /// Return a single row
    pub fn row(&self, y: usize) -> &[u8] {
        debug_assert!(y < self.height);
        &self.data[y * self.width .. (y + 1) * self.width]
    }
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        debug_assert!(y < self.height);
        &mut self.data[y * self.width .. (y + 1) * self.width]
    }
    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0);
    }
    /// Save as an 8-bit grayscale image
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<(), Error> {
        crate::pgm::write_file(self, filename)
    }

    /// Visible part of `[x, x + width)` on row `y`, as buffer columns
    fn clip_span(&self, x: i32, y: i32, width: i32) -> Option<(usize, usize, usize)> {
        if y < 0 || y as usize >= self.height || width <= 0 {
            return None;
        }
        let x0 = x.max(0) as i64;
        let x1 = (i64::from(x) + i64::from(width)).min(self.width as i64);
        if x0 >= x1 {
            return None;
        }
        Some((y as usize, x0 as usize, x1 as usize))
    }
    fn fill_span(&mut self, x: i32, y: i32, width: i32, alpha: u8) {
        if let Some((y, x0, x1)) = self.clip_span(x, y, width) {
            self.row_mut(y)[x0 .. x1].iter_mut().for_each(|v| *v = alpha);
        }
    }
}

impl Blitter for AlphaBuffer {
    fn blit_h(&mut self, x: i32, y: i32, width: i32, alpha: u8) {
        self.fill_span(x, y, width, alpha);
    }
    fn blit_anti_rect(&mut self, rect: &AntiRect) {
        for y in rect.y .. rect.y + rect.height {
            for &(x, width, alpha) in rect.spans().iter() {
                self.fill_span(x, y, width, alpha);
            }
        }
    }
    fn blit_mask(&mut self, mask: &MaskView<'_>) {
        let area = match mask.bounds.intersect(&self.bounds()) {
            Some(area) => area,
            None => return,
        };
        for y in area.top .. area.bottom {
            let src = &mask.row(y)[(area.left - mask.bounds.left) as usize ..];
            let dst = &mut self.row_mut(y as usize)[area.left as usize .. area.right as usize];
            dst.copy_from_slice(&src[.. dst.len()]);
        }
    }
}

impl Index<(usize,usize)> for AlphaBuffer {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        &self.data[index.1 * self.width + index.0]
    }
}
impl IndexMut<(usize,usize)> for AlphaBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u8 {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        &mut self.data[index.1 * self.width + index.0]
    }
}
