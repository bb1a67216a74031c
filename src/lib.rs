//! How does this work
//!
//! ```text
//!    acc = DeltaAccumulator::new(arena, bounds, force_rle)
//!      Mask  -- small, narrow bounds ('CoverageDeltaMask::suitable')
//!      List  -- everything else, or when forced
//!  Producer (edge walker)
//!    add_delta(x, y, delta) -- every edge crossing of every row
//!    set_anti_rect()        -- optional rectangular fast path
//!  Consumer
//!    acc.blit(rule, blitter)
//!      Mask
//!        convert_coverage_to_alpha() -- prefix sum + alpha, 8 lanes at a time
//!                                       (dispatched on the SIMD `Level`)
//!        blit_mask(prepare_mask())
//!      List
//!        blit_coverage_deltas()
//!          sort(y)                   -- or a one row mask for dense rows
//!          prefix sum over get_delta(y, i)
//!          blit_h(x, y, width, alpha)
//! ```
//!
//!  Coverage is 16.16 fixed point; FIXED1 is a fully covered pixel.

pub mod rect;
pub mod lanes;
pub mod alpha;
pub mod arena;
pub mod list;
pub mod mask;
pub mod accumulator;
pub mod blit;
pub mod buffer;
pub mod pgm;
pub mod error;

pub use fearless_simd;

pub use rect::*;
pub use lanes::*;
pub use alpha::*;
pub use arena::*;
pub use list::*;
pub use mask::*;
pub use accumulator::*;
pub use blit::*;
pub use buffer::*;
pub use error::*;

/// 16.16 fixed point
pub type Fixed = i32;

pub const FIXED_SHIFT : i32   = 16;
pub const FIXED1      : Fixed = 1 << FIXED_SHIFT;
