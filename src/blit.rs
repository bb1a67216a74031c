//! Turning accumulated deltas into pixels

use log::trace;

use crate::alpha::CoverageRule;
use crate::list::CoverageDeltaList;
use crate::mask::CoverageDeltaMask;
use crate::mask::MaskView;
use crate::rect::AntiRect;
use crate::rect::IntRect;
use crate::Fixed;

/// Destination of anti-aliased coverage
///
/// Coordinates are in destination pixel space.
pub trait Blitter {
    /// Blit a horizontal run of `width` pixels with a single alpha
    fn blit_h(&mut self, x: i32, y: i32, width: i32, alpha: u8);
    /// Blit a rectangle with alpha-blended left and right columns
    fn blit_anti_rect(&mut self, rect: &AntiRect);
    /// Blit a ready alpha mask
    fn blit_mask(&mut self, mask: &MaskView<'_>);
}

/// Blit every row of `deltas` inside `clip`
///
/// Rows are sorted here as they are reached. A row that is unsorted and
/// dense compared to the clip width is summed through a one row mask
/// instead, unless the list forces run-length output.
pub fn blit_coverage_deltas<B: Blitter>(deltas: &mut CoverageDeltaList<'_>, clip: &IntRect,
                                        rule: CoverageRule, blitter: &mut B) {
    let can_use_mask = !deltas.force_rle()
        && CoverageDeltaMask::can_handle(&IntRect::from_ltrb(0, 0, clip.width(), 1));
    let anti_rect = *deltas.anti_rect();

    let mut y = deltas.top();
    while y < deltas.bottom() {
        if !anti_rect.is_empty() && y == anti_rect.y {
            blit_anti_rect_clipped(&anti_rect, clip, deltas.bottom(), blitter);
            y += anti_rect.height;
            continue;
        }

        if can_use_mask && !deltas.sorted(y) && deltas.count(y) << 3 >= clip.width() as usize {
            trace!("BLIT ROW AS MASK: y {} count {}", y, deltas.count(y));
            let row = IntRect::from_ltrb(clip.left, y, clip.right, y + 1);
            let mut mask = CoverageDeltaMask::new(row);
            for d in deltas.row(y).iter().filter(|d| d.x >= clip.left && d.x < clip.right) {
                mask.add_delta(d.x, y, d.delta);
            }
            mask.convert_coverage_to_alpha(rule.even_odd, rule.inverse, rule.convex);
            blitter.blit_mask(&mask.prepare_mask());
            y += 1;
            continue;
        }

        deltas.sort(y);

        let mut last_x = clip.left;
        let mut coverage: Fixed = 0;
        // Deltas left of the clip are precision errors
        for d in deltas.row(y).iter()
            .skip_while(|d| d.x < clip.left)
            .take_while(|d| d.x < clip.right)
        {
            if d.x > last_x {
                let alpha = rule.alpha(coverage);
                if alpha != 0 {
                    blitter.blit_h(last_x, y, d.x - last_x, alpha);
                }
                last_x = d.x;
            }
            coverage = coverage.wrapping_add(d.delta);
        }
        if last_x < clip.right {
            let alpha = rule.alpha(coverage);
            if alpha != 0 {
                blitter.blit_h(last_x, y, clip.right - last_x, alpha);
            }
        }
        y += 1;
    }
}

/// Blit `rect` whole when it lies inside `clip` and above `bottom`,
/// otherwise as clipped runs
fn blit_anti_rect_clipped<B: Blitter>(rect: &AntiRect, clip: &IntRect, bottom: i32, blitter: &mut B) {
    let bottom = bottom.min(clip.bottom);
    if rect.x >= clip.left && rect.right() <= clip.right && rect.y + rect.height <= bottom {
        blitter.blit_anti_rect(rect);
        return;
    }
    trace!("CLIP ANTI RECT: {:?} to {:?}", rect, clip);
    for y in rect.y .. (rect.y + rect.height).min(bottom) {
        for &(x, width, alpha) in rect.spans().iter() {
            let x0 = x.max(clip.left);
            let x1 = (x + width).min(clip.right);
            if x0 < x1 && alpha != 0 {
                blitter.blit_h(x0, y, x1 - x0, alpha);
            }
        }
    }
}
