#![allow(dead_code)]

/// Small deterministic xorshift generator for delta streams
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        XorShift(seed.max(1))
    }
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
    /// Uniform value in `lo .. hi`
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        assert!(lo < hi);
        lo + (self.next_u32() % (hi - lo) as u32) as i32
    }
}
