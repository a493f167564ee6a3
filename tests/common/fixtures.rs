//! Test fixtures and constants.

use std::path::{Path, PathBuf};

/// Known RGBA pixels and what the key does to them at the default threshold
pub mod pixels {
    /// Fully saturated, passes through
    pub const RED: [u8; 4] = [255, 0, 0, 255];

    /// Saturation 1 with partial alpha, passes through
    pub const HALF_GREEN: [u8; 4] = [0, 200, 0, 128];

    /// Zero saturation, keyed
    pub const GREY: [u8; 4] = [128, 128, 128, 255];

    /// Saturation 2/255 (about 0.0078), keyed at 0.02
    pub const NEAR_GREY: [u8; 4] = [255, 253, 254, 255];

    /// Saturation 0.4
    pub const DUSTY_ROSE: [u8; 4] = [250, 150, 200, 255];

    /// Black, keyed at every threshold
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
}

/// Encode raw pixel data as a PNG with the given color type and depth.
pub fn png_bytes(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf
}

/// Encode RGBA8 pixels, row-major, as a PNG.
pub fn rgba_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    png_bytes(width, height, png::ColorType::Rgba, png::BitDepth::Eight, &data)
}

/// A width x height image where every row is `row`, repeated.
pub fn striped(width: u32, height: u32, row: &[[u8; 4]]) -> Vec<[u8; 4]> {
    assert_eq!(row.len(), width as usize);
    (0..height).flat_map(|_| row.iter().copied()).collect()
}

/// Write `bytes` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
