use serde::Serialize;

use crate::config::{DEFAULT_SCALE_FACTOR, DEFAULT_SCENE_BOUND};
use crate::error::{CatalogError, Result};

/// Position in unscaled catalog units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Named-object policy: coordinates pass through untouched.
#[inline]
pub fn passthrough(x: f64, y: f64, z: f64) -> Coordinates {
    Coordinates { x, y, z }
}

/// Unit-sphere projection of equatorial angles (degrees), the same one the
/// catalog service applies when it emits X/Y/Z.
pub fn equatorial_to_cartesian(ra_deg: f64, dec_deg: f64) -> Coordinates {
    let (ra, dec) = (ra_deg.to_radians(), dec_deg.to_radians());
    Coordinates {
        x: dec.cos() * ra.cos(),
        y: dec.cos() * ra.sin(),
        z: dec.sin(),
    }
}

/// Pick a named object's coordinates: catalog X/Y/Z when usable, otherwise
/// reconstructed from ra/dec. Fails when neither is available.
pub fn resolve(
    cartesian: Option<(f64, f64, f64)>,
    ra: Option<f64>,
    dec: Option<f64>,
) -> Result<Coordinates> {
    match (cartesian, ra, dec) {
        (Some((x, y, z)), _, _) => Ok(passthrough(x, y, z)),
        (None, Some(ra), Some(dec)) => Ok(equatorial_to_cartesian(ra, dec)),
        _ => Err(CatalogError::Validation(
            "record has neither numeric X/Y/Z nor ra/dec".to_string(),
        )),
    }
}

/// Particle policy: multiply every axis by a factor and keep the result
/// only if each axis stays strictly inside `bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneScale {
    pub factor: f64,
    pub bound: f64,
}

impl Default for SceneScale {
    fn default() -> Self {
        Self {
            factor: DEFAULT_SCALE_FACTOR,
            bound: DEFAULT_SCENE_BOUND,
        }
    }
}

impl SceneScale {
    pub fn new(factor: f64, bound: f64) -> Self {
        Self { factor, bound }
    }

    /// `None` if any input is non-finite or any scaled axis has
    /// magnitude `>= bound`.
    pub fn apply(&self, x: f64, y: f64, z: f64) -> Option<[f64; 3]> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return None;
        }
        let scaled = [x * self.factor, y * self.factor, z * self.factor];
        if scaled.iter().all(|a| a.abs() < self.bound) {
            Some(scaled)
        } else {
            None
        }
    }
}

/// [`SceneScale::apply`] with the default scene bound.
pub fn scale_to_scene(x: f64, y: f64, z: f64, scale_factor: f64) -> Option<[f64; 3]> {
    SceneScale::new(scale_factor, DEFAULT_SCENE_BOUND).apply(x, y, z)
}
