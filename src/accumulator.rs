//! Choosing between a delta list and a delta mask for a shape

use log::debug;

use crate::alpha::CoverageRule;
use crate::arena::DeltaArena;
use crate::blit::blit_coverage_deltas;
use crate::blit::Blitter;
use crate::list::CoverageDeltaList;
use crate::mask::CoverageDeltaMask;
use crate::rect::IntRect;
use crate::Fixed;

/// Anything an edge walker can feed coverage deltas into
pub trait DeltaSink {
    /// Add `delta` to the coverage change at column `x` of row `y`
    fn add_delta(&mut self, x: i32, y: i32, delta: Fixed);
    fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                     left_alpha: u8, right_alpha: u8);
    fn top(&self) -> i32;
    fn bottom(&self) -> i32;
}

impl<'a> DeltaSink for CoverageDeltaList<'a> {
    fn add_delta(&mut self, x: i32, y: i32, delta: Fixed) {
        CoverageDeltaList::add_delta(self, x, y, delta);
    }
    fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                     left_alpha: u8, right_alpha: u8) {
        CoverageDeltaList::set_anti_rect(self, x, y, width, height, left_alpha, right_alpha);
    }
    fn top(&self) -> i32 {
        CoverageDeltaList::top(self)
    }
    fn bottom(&self) -> i32 {
        CoverageDeltaList::bottom(self)
    }
}

impl DeltaSink for CoverageDeltaMask {
    fn add_delta(&mut self, x: i32, y: i32, delta: Fixed) {
        CoverageDeltaMask::add_delta(self, x, y, delta);
    }
    fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                     left_alpha: u8, right_alpha: u8) {
        CoverageDeltaMask::set_anti_rect(self, x, y, width, height, left_alpha, right_alpha);
    }
    fn top(&self) -> i32 {
        CoverageDeltaMask::top(self)
    }
    fn bottom(&self) -> i32 {
        CoverageDeltaMask::bottom(self)
    }
}

/// Coverage deltas of one shape, in whichever form suits its bounds
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum DeltaAccumulator<'a> {
    List { list: CoverageDeltaList<'a>, clip: IntRect },
    Mask(CoverageDeltaMask),
}

impl<'a> DeltaAccumulator<'a> {
    /// Use a mask for small, narrow `bounds` unless `force_rle` asks for a list
    pub fn new(arena: &'a mut DeltaArena, bounds: IntRect, force_rle: bool) -> Self {
        if !force_rle && CoverageDeltaMask::suitable(&bounds) {
            debug!("ACCUMULATOR: mask for {:?}", bounds);
            DeltaAccumulator::Mask(CoverageDeltaMask::new(bounds))
        } else {
            debug!("ACCUMULATOR: list for {:?} force_rle {}", bounds, force_rle);
            let list = CoverageDeltaList::new(arena, bounds.top, bounds.bottom, force_rle);
            DeltaAccumulator::List { list, clip: bounds }
        }
    }
    pub fn is_mask(&self) -> bool {
        matches!(self, DeltaAccumulator::Mask(_))
    }
    /// Turn the accumulated deltas into alpha and hand them to `blitter`
    pub fn blit<B: Blitter>(self, rule: CoverageRule, blitter: &mut B) {
        match self {
            DeltaAccumulator::Mask(mut mask) => {
                mask.convert_coverage_to_alpha(rule.even_odd, rule.inverse, rule.convex);
                blitter.blit_mask(&mask.prepare_mask());
            }
            DeltaAccumulator::List { mut list, clip } => {
                blit_coverage_deltas(&mut list, &clip, rule, blitter);
            }
        }
    }
}

impl<'a> DeltaSink for DeltaAccumulator<'a> {
    fn add_delta(&mut self, x: i32, y: i32, delta: Fixed) {
        match self {
            DeltaAccumulator::List { list, .. } => list.add_delta(x, y, delta),
            DeltaAccumulator::Mask(mask) => mask.add_delta(x, y, delta),
        }
    }
    fn set_anti_rect(&mut self, x: i32, y: i32, width: i32, height: i32,
                     left_alpha: u8, right_alpha: u8) {
        match self {
            DeltaAccumulator::List { list, .. } =>
                list.set_anti_rect(x, y, width, height, left_alpha, right_alpha),
            DeltaAccumulator::Mask(mask) =>
                mask.set_anti_rect(x, y, width, height, left_alpha, right_alpha),
        }
    }
    fn top(&self) -> i32 {
        match self {
            DeltaAccumulator::List { list, .. } => list.top(),
            DeltaAccumulator::Mask(mask) => mask.top(),
        }
    }
    fn bottom(&self) -> i32 {
        match self {
            DeltaAccumulator::List { list, .. } => list.bottom(),
            DeltaAccumulator::Mask(mask) => mask.bottom(),
        }
    }
}
