//! Sparse per-row coverage deltas

use std::cmp::Ordering;
use std::fmt;

use log::debug;
use log::trace;
use smallvec::SmallVec;

use crate::arena::DeltaArena;
use crate::rect::AntiRect;
use crate::Fixed;

/// Deltas stored per row before the row needs the arena
#[cfg(not(feature = "small-stack"))]
pub const INIT_ROW_SIZE: usize = 32;
#[cfg(feature = "small-stack")]
pub const INIT_ROW_SIZE: usize = 8;

/// Rows whose initial deltas live inside the list itself
pub const RESERVED_HEIGHT: usize = 128;

/// Change of coverage at column `x`
///
/// The row is implied by the list holding the delta. Deltas are ordered by
/// `x` alone, so two deltas on the same column compare as `Equal` while
/// still differing in `delta`.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub struct CoverageDelta {
    pub x: i32,
    /// Amount the coverage changes, 16.16 fixed point
    pub delta: Fixed,
}

impl CoverageDelta {
    pub fn new(x: i32, delta: Fixed) -> Self {
        CoverageDelta { x, delta }
    }
}

impl PartialOrd for CoverageDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoverageDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.cmp(&other.x)
    }
}

#[derive(Debug,Copy,Clone,PartialEq)]
enum Storage {
    /// Offset into the list's inline storage
    Reserved(usize),
    /// Offset into the arena
    Arena(usize),
    /// Beyond the reserved rows and nothing added yet
    Unallocated,
}

#[derive(Debug,Copy,Clone)]
struct Row {
    storage: Storage,
    count: usize,
    max_count: usize,
    sorted: bool,
}

/// Coverage deltas for rows `top..bottom`
///
/// Each row holds `count(y)` deltas in insertion order. `sorted(y)` tells
/// whether that order happens to be by `x`; `sort(y)` makes it so. Once
/// sorted, `get_delta(y, i)` is the `i`-th leftmost delta of row `y`.
pub struct CoverageDeltaList<'a> {
    arena: &'a mut DeltaArena,
    top: i32,
    bottom: i32,
    force_rle: bool,
    anti_rect: AntiRect,
    rows: SmallVec<[Row; RESERVED_HEIGHT]>,
    reserved: [CoverageDelta; RESERVED_HEIGHT * INIT_ROW_SIZE],
}

impl<'a> CoverageDeltaList<'a> {
    /// Create an empty list for rows `top..bottom`
    ///
    /// `force_rle` is carried for the consumer, which then never switches a
    /// row over to a mask.
    pub fn new(arena: &'a mut DeltaArena, top: i32, bottom: i32, force_rle: bool) -> Self {
        debug_assert!(top <= bottom, "list rows {}..{}", top, bottom);
        let height = (bottom - top).max(0) as usize;
        let rows = (0 .. height).map(|i| {
            let storage = if i < RESERVED_HEIGHT {
                Storage::Reserved(i * INIT_ROW_SIZE)
            } else {
                Storage::Unallocated
            };
            Row { storage, count: 0, max_count: INIT_ROW_SIZE, sorted: true }
        }).collect();
        CoverageDeltaList {
            arena, top, bottom, force_rle,
            anti_rect: AntiRect::default(),
            rows,
            reserved: [CoverageDelta::default(); RESERVED_HEIGHT * INIT_ROW_SIZE],
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }
    pub fn bottom(&self) -> i32 {
        self.bottom
    }
    pub fn force_rle(&self) -> bool {
        self.force_rle
    }
    pub fn count(&self, y: i32) -> usize {
        self.rows[self.index(y)].count
    }
    pub fn sorted(&self, y: i32) -> bool {
        self.rows[self.index(y)].sorted
    }
    pub fn add_delta(&mut self, x: i32, y: i32, delta: Fixed) {
        self.push_back(y, CoverageDelta { x, delta });
    }
    /// The `i`-th delta of row `y`, in sorted order only after `sort(y)`
    pub fn get_delta(&self, y: i32, i: usize) -> &CoverageDelta {
        debug_assert!(i < self.count(y), "delta {} of {} on row {}", i, self.count(y), y);
        &self.row(y)[i]
    }
    /// All deltas of row `y` in their current order
    pub fn row(&self, y: i32) -> &[CoverageDelta] {
        let row = self.rows[self.index(y)];
        match row.storage {
            Storage::Reserved(start) => &self.reserved[start .. start + row.count],
            Storage::Arena(start) => self.arena.region(start, row.count),
            Storage::Unallocated => &[],
        }
    }
    /// Sort row `y` by `x`, if it is not sorted already
    pub fn sort(&mut self, y: i32) {
        let i = self.index(y);
        if !self.rows[i].sorted {
            trace!("SORT ROW: y {} count {}", y, self.rows[i].count);
            self.row_mut(y).sort_unstable();
            self.rows[i].sorted = true;
        }
    }

    pub fn anti_rect(&self) -> &AntiRect {
        &self.anti_rect
    }
    pub fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                         left_alpha: u8, right_alpha: u8) {
        self.anti_rect = AntiRect::new(x, y, width, height, left_alpha, right_alpha);
    }

    pub fn push_back(&mut self, y: i32, delta: CoverageDelta) {
        let i = self.index(y);
        let mut row = self.rows[i];
        let last_x = self.row(y).last().map(|d| d.x);
        self.reserve_one(y, &mut row);
        debug_assert!(row.count < row.max_count);
        match row.storage {
            Storage::Reserved(start) => self.reserved[start + row.count] = delta,
            Storage::Arena(start) => self.arena.region_mut(start, row.max_count)[row.count] = delta,
            Storage::Unallocated => {}
        }
        row.count += 1;
        row.sorted = row.sorted && last_x.map_or(true, |x| delta.x >= x);
        self.rows[i] = row;
    }

    /// Make room for one more delta in `row`, moving it to the arena as needed
    fn reserve_one(&mut self, y: i32, row: &mut Row) {
        if row.storage == Storage::Unallocated {
            row.storage = Storage::Arena(self.arena.alloc(row.max_count));
        }
        if row.count < row.max_count {
            return;
        }
        let max_count = row.max_count * 2;
        let start = match row.storage {
            Storage::Reserved(old) => {
                let start = self.arena.alloc(max_count);
                self.arena.region_mut(start, row.count)
                    .copy_from_slice(&self.reserved[old .. old + row.count]);
                start
            }
            Storage::Arena(old) => self.arena.grow(old, row.count, row.max_count, max_count),
            Storage::Unallocated => self.arena.alloc(max_count),
        };
        trace!("GROW ROW: y {} {} -> {}", y, row.max_count, max_count);
        row.storage = Storage::Arena(start);
        row.max_count = max_count;
    }

    fn row_mut(&mut self, y: i32) -> &mut [CoverageDelta] {
        let row = self.rows[self.index(y)];
        match row.storage {
            Storage::Reserved(start) => &mut self.reserved[start .. start + row.count],
            Storage::Arena(start) => self.arena.region_mut(start, row.count),
            Storage::Unallocated => &mut [],
        }
    }
    fn index(&self, y: i32) -> usize {
        debug_assert!(y >= self.top && y < self.bottom,
                      "row {} outside {}..{}", y, self.top, self.bottom);
        (y - self.top) as usize
    }
}

impl<'a> Drop for CoverageDeltaList<'a> {
    fn drop(&mut self) {
        debug!("DELTA LIST: rows {}..{} arena allocated {} abandoned {}",
               self.top, self.bottom, self.arena.allocated(), self.arena.abandoned());
    }
}

impl<'a> fmt::Debug for CoverageDeltaList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageDeltaList")
            .field("top", &self.top)
            .field("bottom", &self.bottom)
            .field("force_rle", &self.force_rle)
            .field("anti_rect", &self.anti_rect)
            .field("deltas", &self.rows.iter().map(|r| r.count).sum::<usize>())
            .finish()
    }
}
