//! The per-image transformation effects.
//!
//! An effect reads the image's `current` buffer and writes its `next` buffer.
//! Four effects are recognized, by identifier: `"G"` grayscale, `"S"` sharpen,
//! `"E"` edge detection and `"B"` blur. The last three are 3x3 convolutions.

use image::Rgba;

use super::Image;
use crate::err::EditorError;

const SHARPEN: [[f64; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];
const EDGE_DETECT: [[f64; 3]; 3] = [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]];
const BLUR: [[f64; 3]; 3] = [[1.0 / 9.0; 3]; 3];

/// Apply the effect named by `effect` to `image`.
///
/// Fails with [`EditorError::UnknownEffect`] on an unrecognized identifier.
pub fn apply(image: &mut Image, effect: &str) -> Result<(), EditorError> {
    match effect {
        "G" => image.grayscale(),
        "S" => image.convolve(&SHARPEN),
        "E" => image.convolve(&EDGE_DETECT),
        "B" => image.convolve(&BLUR),
        other => return Err(EditorError::UnknownEffect(other.to_string())),
    }
    Ok(())
}

/// Clamp a channel sum to the legal 16-bit channel range.
fn clamp(comp: f64) -> u16 {
    comp.clamp(0.0, 65535.0) as u16
}

impl Image {
    /// Set every pixel's R, G and B to the unweighted average of the three
    /// original channels. Alpha is kept.
    fn grayscale(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let Rgba([r, g, b, a]) = *self.current.get_pixel(x, y);
                let grey = ((r as u32 + g as u32 + b as u32) / 3) as u16;
                self.next.put_pixel(x, y, Rgba([grey, grey, grey, a]));
            }
        }
    }

    /// 3x3 kernel convolution with zero padding outside the image bounds.
    /// Alpha is taken from the center pixel.
    fn convolve(&mut self, kernel: &[[f64; 3]; 3]) {
        let (width, height) = (self.width() as i64, self.height() as i64);
        for y in 0..height {
            for x in 0..width {
                let mut sums = [0.0f64; 3];
                for (ky, row) in kernel.iter().enumerate() {
                    for (kx, weight) in row.iter().enumerate() {
                        let cx = x + kx as i64 - 1;
                        let cy = y + ky as i64 - 1;
                        if cx >= 0 && cy >= 0 && cx < width && cy < height {
                            let Rgba([r, g, b, _]) =
                                *self.current.get_pixel(cx as u32, cy as u32);
                            sums[0] += r as f64 * weight;
                            sums[1] += g as f64 * weight;
                            sums[2] += b as f64 * weight;
                        }
                    }
                }
                let alpha = self.current.get_pixel(x as u32, y as u32)[3];
                self.next.put_pixel(
                    x as u32,
                    y as u32,
                    Rgba([clamp(sums[0]), clamp(sums[1]), clamp(sums[2]), alpha]),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Buffer;

    fn image_from(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgba<u16>) -> Image {
        Image {
            current: Buffer::from_fn(width, height, f),
            next: Buffer::new(width, height),
        }
    }

    #[test]
    fn test_grayscale_average() {
        let mut img = image_from(2, 2, |_, _| Rgba([300, 600, 900, 42]));
        apply(&mut img, "G").unwrap();
        for pixel in img.next.pixels() {
            assert_eq!(*pixel, Rgba([600, 600, 600, 42]));
        }
    }

    #[test]
    fn test_grayscale_truncates() {
        let mut img = image_from(1, 1, |_, _| Rgba([1, 1, 0, 7]));
        apply(&mut img, "G").unwrap();
        // (1 + 1 + 0) / 3 = 0 in integer channel space.
        assert_eq!(*img.next.get_pixel(0, 0), Rgba([0, 0, 0, 7]));
    }

    #[test]
    fn test_identity_kernel() {
        let mut img = image_from(3, 3, |x, y| Rgba([(x * 1000) as u16, (y * 1000) as u16, 5, 9]));
        let identity = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        img.convolve(&identity);
        assert_eq!(img.current, img.next);
    }

    #[test]
    fn test_blur_keeps_uniform_interior() {
        let mut img = image_from(5, 5, |_, _| Rgba([900, 900, 900, 1]));
        apply(&mut img, "B").unwrap();
        // Away from the zero-padded border the nine samples are identical.
        let Rgba([r, g, b, a]) = *img.next.get_pixel(2, 2);
        assert_eq!((r, g, b, a), (900, 900, 900, 1));
        // On the border the padding pulls the average down.
        assert!(img.next.get_pixel(0, 0)[0] < 900);
    }

    #[test]
    fn test_convolution_clamps_to_channel_range() {
        // An edge-detect kernel on a flat image sums to 0 in the interior and
        // overshoots 65535 next to the zero padding on a bright image.
        let mut img = image_from(3, 3, |_, _| Rgba([65535, 65535, 65535, 3]));
        apply(&mut img, "E").unwrap();
        assert_eq!(*img.next.get_pixel(1, 1), Rgba([0, 0, 0, 3]));
        assert_eq!(*img.next.get_pixel(0, 0), Rgba([65535, 65535, 65535, 3]));
    }

    #[test]
    fn test_effect_order_matters() {
        let gradient = |x: u32, y: u32| Rgba([(x * 7000) as u16, (y * 9000) as u16, 11000, 5]);
        let mut a = image_from(4, 4, gradient);
        apply(&mut a, "G").unwrap();
        a.promote();
        apply(&mut a, "S").unwrap();
        let mut b = image_from(4, 4, gradient);
        apply(&mut b, "S").unwrap();
        b.promote();
        apply(&mut b, "G").unwrap();
        // Clamping makes grayscale and sharpen non-commuting.
        assert_ne!(a.next, b.next);
    }

    #[test]
    fn test_unknown_effect() {
        let mut img = image_from(1, 1, |_, _| Rgba([0, 0, 0, 0]));
        let err = apply(&mut img, "X").unwrap_err();
        assert_eq!(err, EditorError::UnknownEffect("X".to_string()));
    }
}
