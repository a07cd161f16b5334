// sampler.rs - 等距柱状投影全景图的双线性采样

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::buffer::PixelBuffer;
use crate::mapper::SphericalCoordinate;
use crate::pixel::Pixel;

/// Continuous pixel position of a spherical coordinate in a `width`x`height`
/// equirectangular image. Row 0 is the top of the panorama (maximum latitude).
pub fn spherical_to_equirectangular(coord: SphericalCoordinate, width: u32, height: u32) -> (f32, f32) {
    let fx = (coord.longitude + PI) / TAU * width as f32;
    let fy = (coord.latitude + FRAC_PI_2) / PI * height as f32;
    (fx, height as f32 - fy)
}

#[inline]
fn wrap_index(i: f32, len: u32) -> u32 {
    (i as i64).rem_euclid(len as i64) as u32
}

/// Bilinear interpolation of R, G and B between the four texels around
/// `(fx, fy)`. Output alpha is always 0.
///
/// Both axes wrap: columns because longitude is cyclic, rows because the
/// same modulo is applied vertically. Near the poles the row wrap blends the
/// top and bottom rows of the panorama.
///
/// An empty buffer (zero width or height) has nothing to sample and yields
/// transparent black, `Pixel(0)`.
pub fn bilinear_sample(buffer: &PixelBuffer<'_>, fx: f32, fy: f32) -> Pixel {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Pixel::default();
    }

    let x1 = fx.floor();
    let x2 = x1 + 1.0;
    let y1 = fy.floor();
    let y2 = y1 + 1.0;

    let (c1, c2) = (wrap_index(x1, width), wrap_index(x2, width));
    let (r1, r2) = (wrap_index(y1, height), wrap_index(y2, height));

    let p1 = buffer.pixel(c1, r1);
    let p2 = buffer.pixel(c2, r1);
    let p3 = buffer.pixel(c1, r2);
    let p4 = buffer.pixel(c2, r2);

    let (wx1, wx2) = (x2 - fx, fx - x1);
    let (wy1, wy2) = (y2 - fy, fy - y1);

    let blend = |channel: fn(Pixel) -> u8| -> u8 {
        let upper = wx1 * channel(p1) as f32 + wx2 * channel(p2) as f32;
        let lower = wx1 * channel(p3) as f32 + wx2 * channel(p4) as f32;
        (wy1 * upper + wy2 * lower + 0.5) as u8
    };

    Pixel::from_rgb(blend(Pixel::red), blend(Pixel::green), blend(Pixel::blue))
}

/// Color of the panorama in direction `coord`.
pub fn sample_equirectangular(buffer: &PixelBuffer<'_>, coord: SphericalCoordinate) -> Pixel {
    let (fx, fy) = spherical_to_equirectangular(coord, buffer.width(), buffer.height());
    bilinear_sample(buffer, fx, fy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelFormat;

    fn make_buffer(width: u32, height: u32, f: impl Fn(u32, u32) -> Pixel) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_le_bytes());
            }
        }
        data
    }

    #[test]
    fn test_equirectangular_corners() {
        let (fx, fy) = spherical_to_equirectangular(SphericalCoordinate::new(0.0, 0.0), 512, 256);
        assert!((fx - 256.0).abs() < 1e-3);
        assert!((fy - 128.0).abs() < 1e-3);

        let (fx, fy) = spherical_to_equirectangular(SphericalCoordinate::new(FRAC_PI_2, -PI), 512, 256);
        assert!(fx.abs() < 1e-3);
        assert!(fy.abs() < 1e-3, "north pole should map to row 0, got {fy}");

        let (_, fy) = spherical_to_equirectangular(SphericalCoordinate::new(-FRAC_PI_2, 0.0), 512, 256);
        assert!((fy - 256.0).abs() < 1e-3);
    }

    #[test]
    fn test_integer_positions_are_exact() {
        let data = make_buffer(8, 4, |x, y| Pixel::from_argb(200, (x * 31) as u8, (y * 57) as u8, (x * y) as u8));
        let buf = PixelBuffer::new(8, 4, 32, PixelFormat::Rgba8888, &data).unwrap();

        for y in 0..4 {
            for x in 0..8 {
                let expected = buf.pixel(x, y);
                let got = bilinear_sample(&buf, x as f32, y as f32);
                assert_eq!(got, Pixel::from_rgb(expected.red(), expected.green(), expected.blue()));
            }
        }
    }

    #[test]
    fn test_midpoint_blend_rounds() {
        let data = make_buffer(2, 1, |x, _| if x == 0 { Pixel::from_rgb(0, 0, 0) } else { Pixel::from_rgb(101, 100, 1) });
        let buf = PixelBuffer::new(2, 1, 8, PixelFormat::Rgba8888, &data).unwrap();

        let p = bilinear_sample(&buf, 0.5, 0.0);
        assert_eq!((p.red(), p.green(), p.blue()), (51, 50, 1));
        assert_eq!(p.alpha(), 0);
    }

    #[test]
    fn test_horizontal_seam_is_continuous() {
        // hue ramps 0..255..0 so the left and right edges agree
        let width = 64;
        let data = make_buffer(width, 32, |x, _| {
            let v = if x < width / 2 { x * 8 } else { (width - x) * 8 };
            let v = v.min(255) as u8;
            Pixel::from_rgb(v, 255 - v, 128)
        });
        let buf = PixelBuffer::new(width, 32, width as usize * 4, PixelFormat::Rgba8888, &data).unwrap();

        let before = bilinear_sample(&buf, width as f32 - 0.01, 10.0);
        let after = bilinear_sample(&buf, (width as f32 + 0.01) % width as f32, 10.0);
        let beyond = bilinear_sample(&buf, width as f32 + 0.01, 10.0);

        for (a, b) in [(before, after), (before, beyond)] {
            assert!((a.red() as i32 - b.red() as i32).abs() <= 1, "{a:?} vs {b:?}");
            assert!((a.green() as i32 - b.green() as i32).abs() <= 1, "{a:?} vs {b:?}");
            assert_eq!(a.blue(), b.blue());
        }
    }

    #[test]
    fn test_negative_positions_wrap() {
        let data = make_buffer(4, 2, |x, _| Pixel::from_rgb(x as u8 * 10, 0, 0));
        let buf = PixelBuffer::new(4, 2, 16, PixelFormat::Rgba8888, &data).unwrap();
        assert_eq!(bilinear_sample(&buf, -1.0, 0.0).red(), 30);
    }

    #[test]
    fn test_empty_buffer_returns_transparent_black() {
        for (width, height) in [(0, 0), (0, 4), (4, 0)] {
            let buf = PixelBuffer::new(width, height, width as usize * 4, PixelFormat::Rgba8888, &[]).unwrap();
            for (fx, fy) in [(0.0, 0.0), (1.5, 2.5), (-3.0, 7.0)] {
                assert_eq!(bilinear_sample(&buf, fx, fy), Pixel(0), "{width}x{height} at ({fx}, {fy})");
            }
            let p = sample_equirectangular(&buf, SphericalCoordinate::new(0.3, 1.0));
            assert_eq!(p, Pixel(0));
        }
    }

    #[test]
    fn test_rows_wrap_at_the_bottom_edge() {
        let data = make_buffer(2, 4, |_, y| if y == 0 { Pixel::from_rgb(200, 0, 0) } else { Pixel::from_rgb(0, 0, 0) });
        let buf = PixelBuffer::new(2, 4, 8, PixelFormat::Rgba8888, &data).unwrap();

        // halfway between the last row and row 0
        let p = bilinear_sample(&buf, 0.0, 3.5);
        assert_eq!(p.red(), 100);

        // the south pole lands exactly on row `height`, i.e. row 0
        let p = sample_equirectangular(&buf, SphericalCoordinate::new(-FRAC_PI_2, -PI));
        assert_eq!(p.red(), 200);
    }
}
