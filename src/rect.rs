//! Integer rectangles

/// Integer bounds, `left..right` by `top..bottom`
///
/// Right and bottom are exclusive.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(left <= right && top <= bottom);
        IntRect { left, top, right, bottom }
    }
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }
    pub fn width(&self) -> i32 {
        self.right - self.left
    }
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
    /// Overlap of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, other: &IntRect) -> Option<IntRect> {
        let left   = self.left.max(other.left);
        let top    = self.top.max(other.top);
        let right  = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(IntRect { left, top, right, bottom })
        } else {
            None
        }
    }
}

/// Fast path for an anti-aliased rectangle
///
/// One column of `left_alpha` at `x`, `width` opaque columns, then one
/// column of `right_alpha`, repeated over `height` rows starting at `y`.
/// An empty rectangle has a `height` of zero.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub struct AntiRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub left_alpha: u8,
    pub right_alpha: u8,
}

impl AntiRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32, left_alpha: u8, right_alpha: u8) -> Self {
        AntiRect { x, y, width, height, left_alpha, right_alpha }
    }
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }
    /// Whether row `y` lies inside the rectangle
    pub fn covers_row(&self, y: i32) -> bool {
        !self.is_empty() && y >= self.y && y < self.y + self.height
    }
    /// Horizontal runs of one row as `(x, width, alpha)`
    ///
    /// The right column has a width of zero when `right_alpha` is zero.
    pub fn spans(&self) -> [(i32, i32, u8); 3] {
        let right = if self.right_alpha != 0 { 1 } else { 0 };
        [
            (self.x, 1, self.left_alpha),
            (self.x + 1, self.width, 255),
            (self.x + 1 + self.width, right, self.right_alpha),
        ]
    }
    /// One past the last column written
    pub fn right(&self) -> i32 {
        let (x, w, _) = self.spans()[2];
        x + w
    }
    /// Write a single row of the rectangle into `row`, where `row[0]` is column `left`
    ///
    /// Columns outside the row are dropped.
    pub(crate) fn fill_row(&self, row: &mut [u8], left: i32) {
        let len = row.len() as i64;
        for &(x, w, alpha) in self.spans().iter() {
            let x0 = (i64::from(x) - i64::from(left)).max(0);
            let x1 = (i64::from(x) + i64::from(w) - i64::from(left)).min(len);
            if x0 < x1 {
                row[x0 as usize .. x1 as usize].iter_mut().for_each(|v| *v = alpha);
            }
        }
    }
}
