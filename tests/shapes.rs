
extern crate daa;

use daa::AlphaBuffer;
use daa::CoverageRule;
use daa::DeltaAccumulator;
use daa::DeltaArena;
use daa::DeltaSink;
use daa::IntRect;
use daa::FIXED1;

fn draw(buf: &mut AlphaBuffer, bounds: IntRect, force_rle: bool, rule: CoverageRule,
        feed: impl FnOnce(&mut DeltaAccumulator<'_>)) {
    let mut arena = DeltaArena::new();
    let mut acc = DeltaAccumulator::new(&mut arena, bounds, force_rle);
    assert_eq!(acc.is_mask(), !force_rle);
    feed(&mut acc);
    acc.blit(rule, buf);
}

#[test]
fn shapes() {
    let mut buf = AlphaBuffer::new(64, 48);

    // Diamond with half covered edge columns
    draw(&mut buf, IntRect::from_ltrb(4, 4, 28, 20), false, CoverageRule::non_zero(), |acc| {
        for y in 4 .. 20 {
            let half = (y - 4).min(19 - y);
            let (xl, xr) = (15 - half, 17 + half);
            acc.add_delta(xl, y, FIXED1 / 2);
            acc.add_delta(xl + 1, y, FIXED1 / 2);
            acc.add_delta(xr, y, -FIXED1 / 2);
            acc.add_delta(xr + 1, y, -FIXED1 / 2);
        }
    });

    // Box punched out of its bounds
    let rule = CoverageRule::non_zero().inverse().convex();
    draw(&mut buf, IntRect::from_ltrb(36, 4, 60, 20), false, rule, |acc| {
        for y in 8 .. 16 {
            acc.add_delta(40, y, FIXED1);
            acc.add_delta(56, y, -FIXED1);
        }
    });

    // Overlapping boxes cancel under even-odd, rows 26..29 are an anti-rect
    draw(&mut buf, IntRect::from_ltrb(4, 24, 60, 44), true, CoverageRule::even_odd(), |acc| {
        for y in 24 .. 44 {
            acc.add_delta(8, y, FIXED1);
            acc.add_delta(36, y, -FIXED1);
        }
        for y in 30 .. 40 {
            acc.add_delta(24, y, FIXED1);
            acc.add_delta(56, y, -FIXED1);
        }
        acc.set_anti_rect(40, 26, 10, 3, 64, 192);
    });

    std::fs::create_dir_all("tests/tmp").unwrap();
    buf.to_file("tests/tmp/daa_shapes.png").unwrap();
    assert_eq!(daa::pgm::img_diff("tests/tmp/daa_shapes.png", "images/daa_shapes.pgm").unwrap(), true);
}
