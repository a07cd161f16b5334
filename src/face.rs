// face.rs - 立方体贴图的六个面

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CubeMapError;

/// Identifies one face of the cube map.
///
/// The discriminants match the integer codes used by host bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FaceId {
    Front = 0,
    Back = 1,
    Top = 2,
    Bottom = 3,
    Left = 4,
    Right = 5,
}

impl FaceId {
    /// All faces in index order.
    pub const fn all() -> [FaceId; 6] {
        [
            FaceId::Front,
            FaceId::Back,
            FaceId::Top,
            FaceId::Bottom,
            FaceId::Left,
            FaceId::Right,
        ]
    }

    /// Order in which a full cube is converted.
    pub const CONVERSION_ORDER: [FaceId; 6] = [
        FaceId::Front,
        FaceId::Back,
        FaceId::Top,
        FaceId::Bottom,
        FaceId::Right,
        FaceId::Left,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Top and bottom look along the vertical axis; the rest look at the horizon.
    pub const fn is_polar(self) -> bool {
        matches!(self, FaceId::Top | FaceId::Bottom)
    }

    pub const fn name(self) -> &'static str {
        match self {
            FaceId::Front => "front",
            FaceId::Back => "back",
            FaceId::Top => "top",
            FaceId::Bottom => "bottom",
            FaceId::Left => "left",
            FaceId::Right => "right",
        }
    }
}

impl TryFrom<u32> for FaceId {
    type Error = CubeMapError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FaceId::Front),
            1 => Ok(FaceId::Back),
            2 => Ok(FaceId::Top),
            3 => Ok(FaceId::Bottom),
            4 => Ok(FaceId::Left),
            5 => Ok(FaceId::Right),
            _ => Err(CubeMapError::InvalidFace(code)),
        }
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
