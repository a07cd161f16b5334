// renderer.rs - 核心渲染器：由全景图生成单个立方体面

use image::RgbaImage;
use log::{debug, warn};

use crate::acquire::{AcquirePixels, AcquirePixelsMut};
use crate::buffer::{PixelBuffer, PixelBufferMut, PixelFormat};
use crate::error::{CubeMapError, Result};
use crate::face::FaceId;
use crate::mapper::{cube_to_spherical, normalize_spherical, texture_to_cube, FaceGeometry};
use crate::pixel::Pixel;
use crate::sampler::sample_equirectangular;

fn validate(panorama: &PixelBuffer<'_>, destination: &PixelBufferMut<'_>) -> Result<()> {
    let (pw, ph) = (panorama.width(), panorama.height());
    if ph == 0 || u64::from(pw) != 2 * u64::from(ph) {
        return Err(CubeMapError::DimensionMismatch {
            context: "panorama must be a non-empty 2:1 equirectangular image",
            width: pw,
            height: ph,
        });
    }

    let (fw, fh) = (destination.width(), destination.height());
    if fw != fh {
        return Err(CubeMapError::DimensionMismatch {
            context: "face buffer must be square",
            width: fw,
            height: fh,
        });
    }

    if destination.format() != panorama.format() {
        return Err(CubeMapError::FormatMismatch {
            panorama: panorama.format(),
            face: destination.format(),
        });
    }

    if panorama.format() != PixelFormat::Rgba8888 {
        return Err(CubeMapError::UnsupportedFormat(panorama.format()));
    }

    Ok(())
}

#[inline]
fn render_pixel(panorama: &PixelBuffer<'_>, geometry: &FaceGeometry, face: FaceId, x: u32, y: u32) -> Pixel {
    let cube = texture_to_cube(x, y, geometry);
    let spherical = normalize_spherical(cube_to_spherical(cube, face));
    sample_equirectangular(panorama, spherical)
}

/// Fills `destination` with `face` of the cube map seen from the center of
/// the equirectangular `panorama`.
///
/// All preconditions are checked before the first write; on error the
/// destination is untouched.
pub fn render_face(panorama: &PixelBuffer<'_>, destination: &mut PixelBufferMut<'_>, face: FaceId) -> Result<()> {
    if let Err(e) = validate(panorama, destination) {
        warn!("Rejecting {} face request: {}", face, e);
        return Err(e);
    }

    let geometry = FaceGeometry::new(destination.width());
    debug!(
        "Rendering {} face {}x{} from {}x{} panorama",
        face,
        geometry.face_width(),
        geometry.face_width(),
        panorama.width(),
        panorama.height()
    );

    for x in 0..geometry.face_width() {
        for y in 0..geometry.face_width() {
            let pixel = render_pixel(panorama, &geometry, face, x, y);
            destination.set_pixel(x, y, pixel);
        }
    }

    debug!("Finished {} face", face);
    Ok(())
}

fn acquisition_failure(target: &'static str, e: CubeMapError) -> CubeMapError {
    match e {
        CubeMapError::AcquisitionFailure { .. } => e,
        other => CubeMapError::AcquisitionFailure {
            target,
            reason: other.to_string(),
        },
    }
}

/// Acquires both bitmaps, then renders. If either acquisition fails nothing
/// is written; views acquired so far are released on return.
pub fn render_face_acquired<P, D>(panorama: &P, destination: &mut D, face: FaceId) -> Result<()>
where
    P: AcquirePixels + ?Sized,
    D: AcquirePixelsMut + ?Sized,
{
    let source = panorama.acquire().map_err(|e| {
        warn!("Could not acquire panorama pixels: {}", e);
        acquisition_failure("panorama", e)
    })?;
    let mut target = destination.acquire_mut().map_err(|e| {
        warn!("Could not acquire face pixels: {}", e);
        acquisition_failure("face", e)
    })?;

    render_face(&source, &mut target, face)
}

/// Allocates a `face_size`² image and renders `face` into it.
pub fn render_face_image(panorama: &RgbaImage, face: FaceId, face_size: u32) -> Result<RgbaImage> {
    let mut img = RgbaImage::new(face_size, face_size);
    render_face_acquired(panorama, &mut img, face)?;
    Ok(img)
}
