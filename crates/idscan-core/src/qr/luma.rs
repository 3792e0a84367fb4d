use image::RgbaImage;
use ndarray::{s, Array2};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// 8-bit grayscale plane, shape = (height, width).
#[derive(Clone, Debug, PartialEq)]
pub struct LumaPlane {
    pub data: Array2<u8>,
}

impl LumaPlane {
    /// BT.601 luminance, with alpha composited over white so transparent
    /// margins read as quiet zone.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            let [r, g, b, a] = img.get_pixel(col as u32, row as u32).0;
            let luma = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
            let alpha = a as f32 / 255.0;
            (luma * alpha + 255.0 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8
        });
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Light-on-dark becomes dark-on-light and vice versa.
    pub fn inverted(&self) -> Self {
        Self {
            data: self.data.mapv(|v| 255 - v),
        }
    }

    /// `(width, height)` that [`rescaled`](Self::rescaled) would produce.
    pub fn rescaled_dims(&self, factor: f32) -> (usize, usize) {
        let (h, w) = self.data.dim();
        (
            ((w as f32 * factor).round() as usize).max(1),
            ((h as f32 * factor).round() as usize).max(1),
        )
    }

    /// Resample by `factor`. Upscaling repeats pixels (nearest neighbour);
    /// downscaling averages each output pixel's source footprint.
    pub fn rescaled(&self, factor: f32) -> Self {
        let (h, w) = self.data.dim();
        let (out_w, out_h) = self.rescaled_dims(factor);
        if (out_h, out_w) == (h, w) {
            return self.clone();
        }

        let sx = w as f64 / out_w as f64;
        let sy = h as f64 / out_h as f64;

        let data = if factor >= 1.0 {
            Array2::from_shape_fn((out_h, out_w), |(row, col)| {
                let src_r = ((row as f64 + 0.5) * sy) as usize;
                let src_c = ((col as f64 + 0.5) * sx) as usize;
                self.data[[src_r.min(h - 1), src_c.min(w - 1)]]
            })
        } else {
            Array2::from_shape_fn((out_h, out_w), |(row, col)| {
                let r0 = (row as f64 * sy) as usize;
                let c0 = (col as f64 * sx) as usize;
                let r1 = (((row + 1) as f64 * sy).ceil() as usize).clamp(r0 + 1, h);
                let c1 = (((col + 1) as f64 * sx).ceil() as usize).clamp(c0 + 1, w);
                let block = self.data.slice(s![r0..r1, c0..c1]);
                let sum: u32 = block.iter().map(|&v| v as u32).sum();
                (sum as f32 / block.len() as f32).round() as u8
            })
        };
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_transparent_reads_white() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let plane = LumaPlane::from_rgba(&img);
        assert!(plane.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_half_scale_averages_blocks() {
        let plane = LumaPlane {
            data: Array2::from_shape_vec((2, 2), vec![0, 100, 200, 100]).unwrap(),
        };
        let half = plane.rescaled(0.5);
        assert_eq!(half.data.dim(), (1, 1));
        assert_eq!(half.data[[0, 0]], 100);
    }

    #[test]
    fn test_double_scale_repeats_pixels() {
        let plane = LumaPlane {
            data: Array2::from_shape_vec((1, 2), vec![10, 20]).unwrap(),
        };
        let up = plane.rescaled(2.0);
        assert_eq!(up.data.dim(), (2, 4));
        assert_eq!(up.data.row(1).to_vec(), vec![10, 10, 20, 20]);
    }
}
