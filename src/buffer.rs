// buffer.rs - 外部像素缓冲区的借用视图

use image::RgbaImage;

use crate::error::{CubeMapError, Result};
use crate::pixel::Pixel;

/// Pixel layouts a host bitmap may report. Only `Rgba8888` can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8888,
    Rgb565,
    Rgba4444,
    Alpha8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8888 => 4,
            PixelFormat::Rgb565 | PixelFormat::Rgba4444 => 2,
            PixelFormat::Alpha8 => 1,
        }
    }
}

fn check_layout(width: u32, height: u32, stride: usize, format: PixelFormat, len: usize) -> Result<()> {
    let too_large = || {
        CubeMapError::InvalidBuffer(format!(
            "{}x{} pixels with stride {} do not fit in memory",
            width, height, stride
        ))
    };

    let row_bytes = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(too_large)?;
    if stride < row_bytes {
        return Err(CubeMapError::InvalidBuffer(format!(
            "stride {} is smaller than a row of {} bytes",
            stride, row_bytes
        )));
    }

    let required = if height == 0 {
        0
    } else {
        stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or_else(too_large)?
    };
    if len < required {
        return Err(CubeMapError::InvalidBuffer(format!(
            "{} bytes cannot hold {}x{} pixels with stride {}",
            len, width, height, stride
        )));
    }
    Ok(())
}

/// Read-only view over caller-owned pixels.
///
/// Reading a pixel assumes a 4-byte layout; callers check the format first.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(width: u32, height: u32, stride: usize, format: PixelFormat, data: &'a [u8]) -> Result<Self> {
        check_layout(width, height, stride, format, data.len())?;
        Ok(Self { width, height, stride, format, data })
    }

    /// Tightly packed view over an `image` RGBA buffer.
    pub fn from_rgba_image(img: &'a RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            stride: width as usize * 4,
            format: PixelFormat::Rgba8888,
            data: img.as_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        debug_assert_eq!(self.format.bytes_per_pixel(), 4);
        let offset = y as usize * self.stride + x as usize * 4;
        let word: u32 = bytemuck::pod_read_unaligned(&self.data[offset..offset + 4]);
        Pixel(u32::from_le(word))
    }
}

/// Writable view over caller-owned pixels.
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: &'a mut [u8],
}

impl<'a> PixelBufferMut<'a> {
    pub fn new(width: u32, height: u32, stride: usize, format: PixelFormat, data: &'a mut [u8]) -> Result<Self> {
        check_layout(width, height, stride, format, data.len())?;
        Ok(Self { width, height, stride, format, data })
    }

    pub fn from_rgba_image(img: &'a mut RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            stride: width as usize * 4,
            format: PixelFormat::Rgba8888,
            data: &mut **img,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_view(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
            data: self.data,
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        debug_assert_eq!(self.format.bytes_per_pixel(), 4);
        let offset = y as usize * self.stride + x as usize * 4;
        let word = pixel.0.to_le();
        self.data[offset..offset + 4].copy_from_slice(bytemuck::bytes_of(&word));
    }
}
