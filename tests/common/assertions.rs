//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

/// Assert bytes are a PNG and decode them to (width, height, RGBA8 pixels)
pub fn decode_rgba(bytes: &[u8]) -> (u32, u32, Vec<[u8; 4]>) {
    assert_png(bytes);

    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());

    let pixels: Vec<[u8; 4]> = match info.color_type {
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect(),
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().map(|&g| [g, g, g, 255]).collect(),
        other => panic!("Unexpected color type after expansion: {other:?}"),
    };
    (info.width, info.height, pixels)
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every pixel matches, reporting the first mismatch by position
pub fn assert_pixels(width: u32, actual: &[[u8; 4]], expected: &[[u8; 4]]) {
    assert_eq!(actual.len(), expected.len(), "pixel count differs");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let (x, y) = (i as u32 % width, i as u32 / width);
        assert_eq!(a, e, "pixel ({x}, {y})");
    }
}
