// config.rs - 转换配置与立方体面尺寸规划
//
// Lookup order for the config file:
//   1) <exe_dir>/cubemap.json
//   2) ./cubemap.json          (dev working dir)
// Env overrides (applied last):
//   PANO_CUBEMAP_MAX_TEXTURE_SIZE, PANO_CUBEMAP_HFOV

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CubeMapError, Result};

pub const CONFIG_FILE_NAME: &str = "cubemap.json";
pub const ENV_MAX_TEXTURE_SIZE: &str = "PANO_CUBEMAP_MAX_TEXTURE_SIZE";
pub const ENV_HFOV: &str = "PANO_CUBEMAP_HFOV";

pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 1024;
pub const DEFAULT_HFOV_DEG: f64 = 60.0;

/// Settings that decide how large the generated faces are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Upper bound for the face edge, usually the GPU texture limit.
    pub max_texture_size: u32,
    /// Horizontal field of view of the viewer, in degrees.
    pub hfov_deg: f64,
    /// Largest screen dimension in pixels. `None` means no screen limit.
    pub screen_size: Option<u32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
            hfov_deg: DEFAULT_HFOV_DEG,
            screen_size: None,
        }
    }
}

impl ConversionConfig {
    /// Parses a config and rejects a field of view that is not a positive,
    /// finite angle.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        if !valid_hfov(cfg.hfov_deg) {
            return Err(CubeMapError::Config(serde::de::Error::custom(format!(
                "hfov_deg must be a positive angle, got {}",
                cfg.hfov_deg
            ))));
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Config file if one is found, otherwise defaults; env overrides on top.
    /// A broken file is reported and ignored.
    pub fn load() -> Self {
        let base = match find_config_file() {
            Some(path) => match Self::from_file(&path) {
                Ok(cfg) => {
                    info!("Loaded conversion config from {}", path.display());
                    cfg
                }
                Err(e) => {
                    warn!("Ignoring config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup` (normally the process environment).
    /// Empty or unparsable values keep the current setting.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_MAX_TEXTURE_SIZE) {
            match v.trim().parse::<u32>() {
                Ok(n) => self.max_texture_size = n,
                Err(_) if v.trim().is_empty() => {}
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_MAX_TEXTURE_SIZE, v, e),
            }
        }

        if let Some(v) = lookup(ENV_HFOV) {
            match v.trim().parse::<f64>() {
                Ok(fov) if valid_hfov(fov) => self.hfov_deg = fov,
                Ok(_) => warn!("Ignoring {}={:?}: must be a positive finite angle", ENV_HFOV, v),
                Err(_) if v.trim().is_empty() => {}
                Err(e) => warn!("Ignoring {}={:?}: {}", ENV_HFOV, v, e),
            }
        }

        self
    }

    /// Face edge length for a panorama `equirect_width` pixels wide: the
    /// optimal size rounded up to a power of two, capped at `max_texture_size`.
    pub fn face_size_for(&self, equirect_width: u32) -> u32 {
        let hfov_deg = if valid_hfov(self.hfov_deg) {
            self.hfov_deg
        } else {
            warn!("Invalid hfov_deg {}, using {}", self.hfov_deg, DEFAULT_HFOV_DEG);
            DEFAULT_HFOV_DEG
        };

        let optimal = match self.screen_size {
            Some(screen) => optimal_face_size(screen, equirect_width, hfov_deg),
            None => max_face_size(equirect_width, hfov_deg),
        };
        let max_size = self.max_texture_size.max(1);
        let size = next_power_of_two_at_least(optimal).map_or(max_size, |n| n.min(max_size));
        info!("Texture size: {} (optimal size was {})", size, optimal);
        size
    }
}

fn valid_hfov(hfov_deg: f64) -> bool {
    hfov_deg.is_finite() && hfov_deg > 0.0
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join(CONFIG_FILE_NAME);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from(CONFIG_FILE_NAME);
    if p.exists() {
        return Some(p);
    }

    None
}

/// Largest face that still adds detail: a 90° face covers a quarter of the
/// panorama width at the viewer's zoom.
fn max_face_size(equirect_width: u32, hfov_deg: f64) -> u32 {
    (0.25 * equirect_width as f64 * 90.0 / hfov_deg + 0.5) as u32
}

/// Face size that matches `screen_size` pixels for a `hfov_deg` view, but no
/// larger than the panorama can fill.
pub fn optimal_face_size(screen_size: u32, equirect_width: u32, hfov_deg: f64) -> u32 {
    let for_screen = (90.0 / hfov_deg * screen_size as f64 + 0.5) as u32;
    for_screen.min(max_face_size(equirect_width, hfov_deg))
}

/// Panorama width that matches `screen_size` pixels for a `hfov_deg` view.
pub fn optimal_equirect_size(screen_size: u32, hfov_deg: f64) -> u32 {
    (360.0 / hfov_deg * screen_size as f64 + 0.5) as u32
}

/// Smallest power of two `>= n`, or `None` above `2^31`.
pub fn next_power_of_two_at_least(n: u32) -> Option<u32> {
    n.max(1).checked_next_power_of_two()
}
