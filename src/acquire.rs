// acquire.rs - 宿主位图的像素获取（锁定）接口

use image::RgbaImage;

use crate::buffer::{PixelBuffer, PixelBufferMut};
use crate::error::Result;

/// Something that can hand out a stable read-only pixel view, e.g. a locked
/// platform bitmap. The lock is held for as long as the returned view lives.
pub trait AcquirePixels {
    fn acquire(&self) -> Result<PixelBuffer<'_>>;
}

/// Writable counterpart of [`AcquirePixels`].
pub trait AcquirePixelsMut {
    fn acquire_mut(&mut self) -> Result<PixelBufferMut<'_>>;
}

impl AcquirePixels for RgbaImage {
    fn acquire(&self) -> Result<PixelBuffer<'_>> {
        Ok(PixelBuffer::from_rgba_image(self))
    }
}

impl AcquirePixelsMut for RgbaImage {
    fn acquire_mut(&mut self) -> Result<PixelBufferMut<'_>> {
        Ok(PixelBufferMut::from_rgba_image(self))
    }
}
