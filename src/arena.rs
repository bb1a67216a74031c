//! Region allocator for coverage delta rows

use crate::list::CoverageDelta;

/// Bump allocator of [`CoverageDelta`] cells
///
/// Regions are carved off the end and addressed by offset. Nothing is
/// freed on its own; a row that outgrows its region moves to a larger one
/// and the old region is left behind until [`DeltaArena::reset`].
#[derive(Debug,Default)]
pub struct DeltaArena {
    cells: Vec<CoverageDelta>,
    abandoned: usize,
}

impl DeltaArena {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(cells: usize) -> Self {
        DeltaArena { cells: Vec::with_capacity(cells), abandoned: 0 }
    }
    /// Number of cells handed out since the last reset
    pub fn allocated(&self) -> usize {
        self.cells.len()
    }
    /// Number of cells left behind by growing rows
    pub fn abandoned(&self) -> usize {
        self.abandoned
    }
    /// Drop every region at once
    pub fn reset(&mut self) {
        self.cells.clear();
        self.abandoned = 0;
    }

    /// Carve `len` zeroed cells and return their offset
    pub(crate) fn alloc(&mut self, len: usize) -> usize {
        let start = self.cells.len();
        self.cells.resize(start + len, CoverageDelta::default());
        start
    }
    /// Move `count` live cells of the region at `start` (capacity `old_len`)
    /// into a fresh region of `new_len` cells
    pub(crate) fn grow(&mut self, start: usize, count: usize, old_len: usize, new_len: usize) -> usize {
        debug_assert!(count <= old_len && old_len <= new_len);
        let new_start = self.alloc(new_len);
        self.cells.copy_within(start .. start + count, new_start);
        self.abandoned += old_len;
        new_start
    }
    pub(crate) fn region(&self, start: usize, len: usize) -> &[CoverageDelta] {
        &self.cells[start .. start + len]
    }
    pub(crate) fn region_mut(&mut self, start: usize, len: usize) -> &mut [CoverageDelta] {
        &mut self.cells[start .. start + len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_copies_and_abandons() {
        let mut arena = DeltaArena::new();
        let a = arena.alloc(2);
        arena.region_mut(a, 2)[0] = CoverageDelta::new(3, 7);
        arena.region_mut(a, 2)[1] = CoverageDelta::new(1, -7);
        let b = arena.grow(a, 2, 2, 4);
        assert_eq!(b, 2);
        assert_eq!(arena.region(b, 2), &[CoverageDelta::new(3, 7), CoverageDelta::new(1, -7)]);
        assert_eq!(arena.region(b, 4)[2 ..], [CoverageDelta::default(); 2]);
        assert_eq!(arena.allocated(), 6);
        assert_eq!(arena.abandoned(), 2);
        arena.reset();
        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.abandoned(), 0);
    }
}
