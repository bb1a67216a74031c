//! Reading and writing of 8-bit grayscale alpha images
//!
//! The format follows the file extension (`.png`, `.pgm`, ...).

use std::path::Path;

use log::debug;

use crate::buffer::AlphaBuffer;
use crate::error::Error;

pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<AlphaBuffer, Error> {
    let img = image::open(filename)?.to_luma();
    let (w, h) = img.dimensions();
    Ok(AlphaBuffer::from_raw(img.into_raw(), w as usize, h as usize))
}

pub fn write_file<P: AsRef<Path>>(buf: &AlphaBuffer, filename: P) -> Result<(), Error> {
    image::save_buffer(filename, &buf.data, buf.width as u32, buf.height as u32, image::Gray(8))?;
    Ok(())
}

/// Compare two alpha buffers, logging every pixel that differs
pub fn alpha_diff(a: &AlphaBuffer, b: &AlphaBuffer) -> bool {
    if a.width != b.width || a.height != b.height {
        debug!("ALPHA DIFF: size {}x{} != {}x{}", a.width, a.height, b.width, b.height);
        return false;
    }
    let mut flag = true;
    for (i, (v1, v2)) in a.data.iter().zip(b.data.iter()).enumerate() {
        if v1 != v2 {
            debug!("ALPHA DIFF: {} [{},{}]: {} {}", i, i % a.width, i / a.width, v1, v2);
            flag = false;
        }
    }
    flag
}

/// Compare two image files as alpha
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, Error> {
    let a = read_file(f1)?;
    let b = read_file(f2)?;
    Ok(alpha_diff(&a, &b))
}
