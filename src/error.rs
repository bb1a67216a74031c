//! Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Bounds too large for a [`CoverageDeltaMask`](crate::CoverageDeltaMask)
    #[error("a {width}x{height} mask does not fit into {max} delta cells")]
    MaskTooLarge { width: i32, height: i32, max: usize },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
