// cubic.rs - 六个面组成的立方体全景，逐面顺序转换

use image::RgbaImage;
use log::info;

use crate::error::{CubeMapError, Result};
use crate::face::FaceId;
use crate::renderer::render_face_image;

/// Six square faces of equal size, indexed by [`FaceId`].
#[derive(Debug, Clone, PartialEq)]
pub struct CubicPanorama {
    faces: [RgbaImage; 6],
}

impl CubicPanorama {
    /// `faces` is in [`FaceId::all`] order.
    pub fn new(faces: [RgbaImage; 6]) -> Result<Self> {
        let size = faces[0].width();
        for (face, img) in FaceId::all().into_iter().zip(faces.iter()) {
            let (w, h) = img.dimensions();
            if w != h {
                return Err(CubeMapError::DimensionMismatch {
                    context: "cube face must be square",
                    width: w,
                    height: h,
                });
            }
            if w != size {
                log::warn!("{} face is {}px, front face is {}px", face, w, size);
                return Err(CubeMapError::DimensionMismatch {
                    context: "all cube faces must have the same size",
                    width: w,
                    height: h,
                });
            }
        }
        Ok(Self { faces })
    }

    pub fn face(&self, face: FaceId) -> &RgbaImage {
        &self.faces[face.index()]
    }

    pub fn face_size(&self) -> u32 {
        self.faces[0].width()
    }

    pub fn into_faces(self) -> [RgbaImage; 6] {
        self.faces
    }
}

/// Progress and cancellation hooks for [`convert_panorama`].
pub trait ConversionObserver {
    /// Polled before each face is started.
    fn is_cancelled(&self) -> bool {
        false
    }

    fn on_face_done(&mut self, _face: FaceId, _done: usize, _total: usize) {}
}

impl ConversionObserver for () {}

/// Renders the six faces one after another in [`FaceId::CONVERSION_ORDER`].
pub fn convert_panorama(
    panorama: &RgbaImage,
    face_size: u32,
    observer: &mut dyn ConversionObserver,
) -> Result<CubicPanorama> {
    let total = FaceId::CONVERSION_ORDER.len();
    let mut faces: [RgbaImage; 6] = std::array::from_fn(|_| RgbaImage::new(0, 0));

    info!(
        "Converting {}x{} panorama into {}px cube faces",
        panorama.width(),
        panorama.height(),
        face_size
    );

    for (done, face) in FaceId::CONVERSION_ORDER.into_iter().enumerate() {
        if observer.is_cancelled() {
            info!("Conversion cancelled after {} faces", done);
            return Err(CubeMapError::Cancelled { completed: done });
        }

        faces[face.index()] = render_face_image(panorama, face, face_size)?;
        observer.on_face_done(face, done + 1, total);
        info!("Converted {} face ({}/{})", face, done + 1, total);
    }

    CubicPanorama::new(faces)
}
