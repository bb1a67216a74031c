
extern crate daa;

use daa::blit_coverage_deltas;
use daa::AlphaBuffer;
use daa::AntiRect;
use daa::Blitter;
use daa::CoverageDeltaList;
use daa::CoverageRule;
use daa::DeltaArena;
use daa::IntRect;
use daa::MaskView;
use daa::FIXED1;

#[derive(Debug,PartialEq)]
enum Call {
    H(i32, i32, i32, u8),
    AntiRect(AntiRect),
    Mask(IntRect, Vec<u8>),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Blitter for Recorder {
    fn blit_h(&mut self, x: i32, y: i32, width: i32, alpha: u8) {
        self.calls.push(Call::H(x, y, width, alpha));
    }
    fn blit_anti_rect(&mut self, rect: &AntiRect) {
        self.calls.push(Call::AntiRect(*rect));
    }
    fn blit_mask(&mut self, mask: &MaskView<'_>) {
        self.calls.push(Call::Mask(mask.bounds, mask.image.to_vec()));
    }
}

fn unit_square(list: &mut CoverageDeltaList<'_>) {
    for y in list.top() .. list.bottom() {
        list.add_delta(0, y, FIXED1);
        list.add_delta(10, y, -FIXED1);
    }
}

#[test_log::test]
fn unit_square_runs() {
    let clip = IntRect::from_ltrb(0, 0, 16, 2);
    for rule in &[CoverageRule::non_zero(), CoverageRule::even_odd()] {
        let mut arena = DeltaArena::new();
        let mut list = CoverageDeltaList::new(&mut arena, 0, 2, false);
        unit_square(&mut list);
        let mut rec = Recorder::default();
        blit_coverage_deltas(&mut list, &clip, *rule, &mut rec);
        assert_eq!(rec.calls, vec![Call::H(0, 0, 10, 255), Call::H(0, 1, 10, 255)]);
    }
}

#[test]
fn inverse_unit_square_fills_the_outside() {
    let clip = IntRect::from_ltrb(-4, 0, 16, 1);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 1, false);
    unit_square(&mut list);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero().inverse(), &mut rec);
    assert_eq!(rec.calls, vec![Call::H(-4, 0, 4, 255), Call::H(10, 0, 6, 255)]);
}

#[test]
fn deltas_outside_the_clip_are_dropped() {
    let clip = IntRect::from_ltrb(2, 0, 8, 1);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 1, true);
    list.add_delta(0, 0, FIXED1);
    list.add_delta(4, 0, FIXED1 / 2);
    list.add_delta(6, 0, -FIXED1 / 2);
    list.add_delta(8, 0, -FIXED1);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![Call::H(4, 0, 2, 128)]);
}

#[test]
fn dense_unsorted_row_becomes_a_mask() {
    let clip = IntRect::from_ltrb(0, 0, 8, 2);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 2, false);
    // Row 0: unsorted and 2 * 8 >= 8, row 1: sorted
    list.add_delta(4, 0, -FIXED1);
    list.add_delta(1, 0, FIXED1);
    list.add_delta(1, 1, FIXED1);
    list.add_delta(4, 1, -FIXED1);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![
        Call::Mask(IntRect::from_ltrb(0, 0, 8, 1), vec![0, 255, 255, 255, 0, 0, 0, 0]),
        Call::H(1, 1, 3, 255),
    ]);
    // The mask path leaves the row as it was
    assert!(!list.sorted(0));
}

#[test]
fn force_rle_keeps_runs() {
    let clip = IntRect::from_ltrb(0, 0, 8, 1);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 1, true);
    list.add_delta(4, 0, -FIXED1);
    list.add_delta(1, 0, FIXED1);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![Call::H(1, 0, 3, 255)]);
    assert!(list.sorted(0));
}

#[test]
fn anti_rect_skips_its_rows() {
    let clip = IntRect::from_ltrb(0, 0, 16, 5);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 5, false);
    unit_square(&mut list);
    list.set_anti_rect(2, 1, 5, 3, 10, 20);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![
        Call::H(0, 0, 10, 255),
        Call::AntiRect(AntiRect::new(2, 1, 5, 3, 10, 20)),
        Call::H(0, 4, 10, 255),
    ]);
}

#[test]
fn anti_rect_outside_the_clip_becomes_runs() {
    let clip = IntRect::from_ltrb(0, 0, 16, 4);
    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 4, false);
    unit_square(&mut list);
    // Left column left of the clip, last row below it
    list.set_anti_rect(-1, 2, 5, 3, 10, 20);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![
        Call::H(0, 0, 10, 255),
        Call::H(0, 1, 10, 255),
        Call::H(0, 2, 5, 255),
        Call::H(5, 2, 1, 20),
        Call::H(0, 3, 5, 255),
        Call::H(5, 3, 1, 20),
    ]);

    let mut arena = DeltaArena::new();
    let mut list = CoverageDeltaList::new(&mut arena, 0, 4, false);
    // Right column past the clip, zero alpha on the left
    list.set_anti_rect(10, 0, 5, 1, 0, 20);
    let mut rec = Recorder::default();
    blit_coverage_deltas(&mut list, &clip, CoverageRule::non_zero(), &mut rec);
    assert_eq!(rec.calls, vec![Call::H(11, 0, 5, 255)]);
}

#[test]
fn alpha_buffer_clips() {
    let mut buf = AlphaBuffer::new(4, 2);
    buf.blit_h(-2, 0, 4, 9);
    buf.blit_h(3, 1, 10, 7);
    buf.blit_h(0, 5, 4, 1);
    buf.blit_anti_rect(&AntiRect::new(-1, 1, 1, 4, 50, 60));
    assert_eq!(buf.row(0), &[9, 9, 0, 0]);
    assert_eq!(buf.row(1), &[255, 60, 0, 7]);
    assert_eq!(buf[(3, 1)], 7);
}

#[test]
fn alpha_buffer_image_round_trip() {
    let mut buf = AlphaBuffer::new(16, 3);
    for y in 0 .. 3 {
        buf.blit_h(0, y, 10, 255);
        buf.blit_h(10, y, 1, (y * 60) as u8);
    }
    let dir = std::env::temp_dir();
    let path = dir.join(format!("daa_round_trip_{}.png", std::process::id()));
    buf.to_file(&path).unwrap();
    let back = daa::pgm::read_file(&path).unwrap();
    assert_eq!(back, buf);
    assert!(daa::pgm::img_diff(&path, &path).unwrap());
    std::fs::remove_file(&path).unwrap();
}
