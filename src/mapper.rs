// mapper.rs - 纹理坐标 → 立方体坐标 → 球面坐标

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;

use crate::face::FaceId;

/// Edge length of a cube inscribed in the unit sphere, `2·cos(π/4)`.
pub const CUBE_WIDTH: f32 = std::f32::consts::SQRT_2;
const HALF_CUBE_WIDTH: f32 = CUBE_WIDTH / 2.0;
const HALF_CUBE_WIDTH_SQ: f32 = HALF_CUBE_WIDTH * HALF_CUBE_WIDTH;

/// A point on the selected face, both axes in `[-CUBE_WIDTH/2, CUBE_WIDTH/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeCoordinate {
    pub x: f32,
    pub y: f32,
}

/// Latitude/longitude in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoordinate {
    pub latitude: f32,
    pub longitude: f32,
}

impl SphericalCoordinate {
    pub fn new(latitude: f32, longitude: f32) -> Self {
        Self { latitude, longitude }
    }

    /// Same point with latitude in `[-π/2, π/2]` and longitude in `[-π, π]`.
    pub fn normalized(self) -> Self {
        normalize_spherical(self)
    }

    /// Unit view direction; longitude 0 on the equator looks down +Z.
    pub fn to_direction(self) -> Vec3 {
        let (slon, clon) = self.longitude.sin_cos();
        let (slat, clat) = self.latitude.sin_cos();
        Vec3::new(clat * slon, slat, clat * clon)
    }
}

/// Texel scale of one destination face, computed once per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    face_width: u32,
    delta: f32,
    half_delta: f32,
}

impl FaceGeometry {
    pub fn new(face_width: u32) -> Self {
        let delta = CUBE_WIDTH / face_width as f32;
        Self {
            face_width,
            delta,
            half_delta: delta / 2.0,
        }
    }

    pub fn face_width(&self) -> u32 {
        self.face_width
    }

    /// Cube units covered by one texel.
    pub fn texel_size(&self) -> f32 {
        self.delta
    }
}

/// Center of texel `(x, y)` on the face.
pub fn texture_to_cube(x: u32, y: u32, geometry: &FaceGeometry) -> CubeCoordinate {
    CubeCoordinate {
        x: geometry.delta * x as f32 - HALF_CUBE_WIDTH + geometry.half_delta,
        y: geometry.delta * y as f32 - HALF_CUBE_WIDTH + geometry.half_delta,
    }
}

/// Direction of a face point as latitude/longitude. The result is not normalized.
pub fn cube_to_spherical(cube: CubeCoordinate, face: FaceId) -> SphericalCoordinate {
    match face {
        FaceId::Top | FaceId::Bottom => polar_to_spherical(cube, face),
        FaceId::Front | FaceId::Back | FaceId::Left | FaceId::Right => lateral_to_spherical(cube, face),
    }
}

fn lateral_to_spherical(cube: CubeCoordinate, face: FaceId) -> SphericalCoordinate {
    let d = (cube.x * cube.x + HALF_CUBE_WIDTH_SQ).sqrt();
    let latitude = (cube.y / d).atan();

    let offset = match face {
        FaceId::Front => 0.0,
        FaceId::Back => PI,
        FaceId::Left => -FRAC_PI_2,
        FaceId::Right => FRAC_PI_2,
        FaceId::Top | FaceId::Bottom => unreachable!("polar face {face} in lateral branch"),
    };
    let longitude = (cube.x / HALF_CUBE_WIDTH).atan() + offset;

    SphericalCoordinate { latitude, longitude }
}

fn polar_to_spherical(cube: CubeCoordinate, face: FaceId) -> SphericalCoordinate {
    let CubeCoordinate { x, y } = cube;

    let longitude = if x == 0.0 {
        if y > 0.0 {
            0.0
        } else {
            PI
        }
    } else {
        let beta = (y.abs() / x.abs()).atan();
        match (x >= 0.0, y >= 0.0) {
            (true, true) => -FRAC_PI_2 + beta,
            (false, true) => FRAC_PI_2 - beta,
            (false, false) => FRAC_PI_2 + beta,
            (true, false) => -FRAC_PI_2 - beta,
        }
    };

    // 到面中心的距离
    let z = (x * x + y * y).sqrt();
    let alpha = (z / HALF_CUBE_WIDTH).atan();

    let latitude = match face {
        FaceId::Top => FRAC_PI_2 - alpha,
        FaceId::Bottom => -FRAC_PI_2 + alpha,
        FaceId::Front | FaceId::Back | FaceId::Left | FaceId::Right => {
            unreachable!("lateral face {face} in polar branch")
        }
    };

    SphericalCoordinate { latitude, longitude }
}

/// Wraps into `[-π, π]`, leaving in-range angles bit-identical.
fn wrap_pi(angle: f32) -> f32 {
    if (-PI..=PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// Latitude past a pole continues on the far side, so longitude flips by π.
pub fn normalize_spherical(coord: SphericalCoordinate) -> SphericalCoordinate {
    let mut latitude = wrap_pi(coord.latitude);
    let mut longitude = coord.longitude;

    if latitude < -FRAC_PI_2 {
        latitude = -(PI + latitude);
        longitude += PI;
    }

    if latitude > FRAC_PI_2 {
        latitude = PI - latitude;
        longitude += PI;
    }

    SphericalCoordinate {
        latitude,
        longitude: wrap_pi(longitude),
    }
}
