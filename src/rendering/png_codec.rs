use saturation_key::{BitDepth, Components, PixelFormat};
use std::io::Cursor;

use super::FrameBuffer;
use crate::error::ImageError;

/// Decode a PNG into a frame the saturation key can read.
///
/// Palette, low-bit and `tRNS` images are expanded by the decoder. 8-bit
/// grey, grey-alpha and RGB are widened to RGBA; 16-bit RGB(A) is kept at
/// 16 bits so the filter can reject it with a format error.
pub fn decode_png(bytes: &[u8]) -> Result<FrameBuffer, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(reader.output_buffer_size())
        .map_err(|_| ImageError::Allocation)?;
    buf.resize(reader.output_buffer_size(), 0);
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (width, height) = (info.width, info.height);
    tracing::debug!(
        width,
        height,
        color_type = ?info.color_type,
        bit_depth = ?info.bit_depth,
        "Decoded PNG"
    );

    match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            FrameBuffer::new(buf, width, height, PixelFormat::RGBA8)
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            let data = widen(&buf, 3, |px| [px[0], px[1], px[2], 255])?;
            FrameBuffer::new(data, width, height, PixelFormat::RGBA8)
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let data = widen(&buf, 1, |px| [px[0], px[0], px[0], 255])?;
            FrameBuffer::new(data, width, height, PixelFormat::RGBA8)
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let data = widen(&buf, 2, |px| [px[0], px[0], px[0], px[1]])?;
            FrameBuffer::new(data, width, height, PixelFormat::RGBA8)
        }
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => FrameBuffer::new(
            buf,
            width,
            height,
            PixelFormat::new(BitDepth::U16, Components::Rgba),
        ),
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => FrameBuffer::new(
            buf,
            width,
            height,
            PixelFormat::new(BitDepth::U16, Components::Rgb),
        ),
        (color_type, bit_depth) => Err(ImageError::UnsupportedColor {
            color_type: format!("{color_type:?}"),
            bit_depth: bit_depth as u8,
        }),
    }
}

/// Expand `channels`-per-pixel 8-bit data to RGBA.
fn widen(
    src: &[u8],
    channels: usize,
    to_rgba: impl Fn(&[u8]) -> [u8; 4],
) -> Result<Vec<u8>, ImageError> {
    let mut out = Vec::new();
    out.try_reserve_exact(src.len() / channels * 4)
        .map_err(|_| ImageError::Allocation)?;
    out.extend(src.chunks_exact(channels).flat_map(to_rgba));
    Ok(out)
}

/// Encode an RGBA8 frame as PNG, optionally re-compressed with oxipng.
pub fn encode_png(frame: &FrameBuffer, optimize: bool) -> Result<Vec<u8>, ImageError> {
    if frame.format() != PixelFormat::RGBA8 {
        return Err(ImageError::UnsupportedColor {
            color_type: frame.format().to_string(),
            bit_depth: frame.format().depth.bits() as u8,
        });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // oxipng re-compresses anyway
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(frame.data())?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            Ok(png_bytes)
        }
    }
}
