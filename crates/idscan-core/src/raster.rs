use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use tracing::info;

use crate::config::RasterConfig;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::EditorLayout;
use crate::geometry::Point;
use crate::transform::{CoordinateMapper, TransformState};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Render what is visible inside the frame, at frame display resolution.
///
/// Every output pixel center is mapped back into the source through the
/// inverse transform; pixels the image does not cover stay transparent.
pub fn render_frame(
    source: &RgbaImage,
    transform: &TransformState,
    layout: &EditorLayout,
    config: &RasterConfig,
) -> RgbaImage {
    let out_w = (layout.frame.width.round() as u32).max(1);
    let out_h = (layout.frame.height.round() as u32).max(1);
    let mapper = CoordinateMapper::new(transform, layout, source.width(), source.height());
    let origin = Point::new(layout.frame.x, layout.frame.y);
    let smooth = config.smooth_first_pass;

    let mut out = RgbaImage::new(out_w, out_h);
    let row_bytes = out_w as usize * 4;

    let render_row = |(row, chunk): (usize, &mut [u8])| {
        for col in 0..out_w as usize {
            let display = origin + Point::new(col as f64 + 0.5, row as f64 + 0.5);
            let native = mapper.to_native(display);
            let px = if smooth {
                sample_bilinear(source, native)
            } else {
                sample_nearest(source, native)
            };
            chunk[col * 4..col * 4 + 4].copy_from_slice(&px.0);
        }
    };

    let buf: &mut [u8] = &mut out;
    if (out_w as usize) * (out_h as usize) >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(row_bytes).enumerate().for_each(render_row);
    } else {
        buf.chunks_mut(row_bytes).enumerate().for_each(render_row);
    }

    out
}

/// Uniform factor from frame display resolution up to the image's native
/// resolution.
pub fn native_upscale(transform: &TransformState, layout: &EditorLayout) -> f64 {
    let fit = transform.fit_scale();
    let frame_native_w = layout.frame.width / fit;
    let frame_native_h = layout.frame.height / fit;
    (frame_native_w / layout.frame.width).max(frame_native_h / layout.frame.height)
}

/// Produce the edited bitmap: the frame's visible content, upscaled to
/// native resolution with nearest-neighbour sampling so QR modules and fine
/// print stay sharp.
///
/// Neither the source nor the transform is modified.
pub fn rasterize(
    source: &RgbaImage,
    transform: &TransformState,
    layout: &EditorLayout,
    config: &RasterConfig,
) -> RgbaImage {
    let frame_pass = render_frame(source, transform, layout, config);
    let upscale = native_upscale(transform, layout);
    let out_w = ((layout.frame.width * upscale).round() as u32).max(1);
    let out_h = ((layout.frame.height * upscale).round() as u32).max(1);

    info!(
        frame_w = frame_pass.width(),
        frame_h = frame_pass.height(),
        out_w,
        out_h,
        zoom = transform.zoom_percent(),
        rotation = transform.normalized_rotation(),
        "Rasterized frame"
    );

    if (out_w, out_h) == frame_pass.dimensions() {
        return frame_pass;
    }
    imageops::resize(&frame_pass, out_w, out_h, FilterType::Nearest)
}

fn sample_nearest(source: &RgbaImage, p: Point) -> Rgba<u8> {
    let (w, h) = source.dimensions();
    if p.x < 0.0 || p.y < 0.0 || p.x >= w as f64 || p.y >= h as f64 {
        return TRANSPARENT;
    }
    *source.get_pixel(p.x as u32, p.y as u32)
}

/// Bilinear sample between pixel centers, edges clamped. Points outside the
/// image are transparent.
fn sample_bilinear(source: &RgbaImage, p: Point) -> Rgba<u8> {
    let (w, h) = source.dimensions();
    if p.x < 0.0 || p.y < 0.0 || p.x >= w as f64 || p.y >= h as f64 {
        return TRANSPARENT;
    }

    let fx = (p.x - 0.5).max(0.0);
    let fy = (p.y - 0.5).max(0.0);
    let x0 = (fx.floor() as u32).min(w - 1);
    let y0 = (fy.floor() as u32).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = source.get_pixel(x0, y0).0;
    let p10 = source.get_pixel(x1, y0).0;
    let p01 = source.get_pixel(x0, y1).0;
    let p11 = source.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}
