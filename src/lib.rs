//! Equirectangular panorama to cube map face conversion.
//!
//! Each destination texel is mapped onto the cube surface, converted to
//! latitude/longitude and bilinearly sampled from the 2:1 source panorama.
//! Pixel buffers are borrowed from the caller; the renderer never allocates
//! or keeps them.
//!
//! ```no_run
//! use panorama_cubemap::{render_face, FaceId, PixelBuffer, PixelBufferMut};
//!
//! let pano = image::RgbaImage::new(2048, 1024);
//! let mut face = image::RgbaImage::new(512, 512);
//! render_face(
//!     &PixelBuffer::from_rgba_image(&pano),
//!     &mut PixelBufferMut::from_rgba_image(&mut face),
//!     FaceId::Front,
//! )?;
//! # Ok::<(), panorama_cubemap::CubeMapError>(())
//! ```

pub mod acquire;
pub mod buffer;
pub mod config;
pub mod cubic;
pub mod error;
pub mod face;
pub mod mapper;
pub mod pixel;
pub mod renderer;
pub mod sampler;

pub use acquire::{AcquirePixels, AcquirePixelsMut};
pub use buffer::{PixelBuffer, PixelBufferMut, PixelFormat};
pub use config::{next_power_of_two_at_least, optimal_equirect_size, optimal_face_size, ConversionConfig};
pub use cubic::{convert_panorama, ConversionObserver, CubicPanorama};
pub use error::{CubeMapError, Result};
pub use face::FaceId;
pub use mapper::{
    cube_to_spherical, normalize_spherical, texture_to_cube, CubeCoordinate, FaceGeometry, SphericalCoordinate,
    CUBE_WIDTH,
};
pub use pixel::Pixel;
pub use renderer::{render_face, render_face_acquired, render_face_image};
pub use sampler::{bilinear_sample, sample_equirectangular, spherical_to_equirectangular};
