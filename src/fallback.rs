//! Synthetic starfield used when the catalog cannot supply particles.

use crate::config::{DEFAULT_FALLBACK_COUNT, DEFAULT_FALLBACK_EXTENT};
use crate::random::RandomSource;

/// `count` vertices flattened to `3 * count` floats, every axis uniform in
/// the open interval `(-extent, extent)`.
pub fn generate_fallback_in(count: usize, extent: f64, random: &dyn RandomSource) -> Vec<f64> {
    let mut vertices = Vec::with_capacity(count * 3);
    for _ in 0..count {
        vertices.push(axis(extent, random));
        vertices.push(axis(extent, random));
        vertices.push(axis(extent, random));
    }
    vertices
}

/// A zero sample would land exactly on `-extent`; nudge it inside.
fn axis(extent: f64, random: &dyn RandomSource) -> f64 {
    random
        .range(-extent, extent)
        .max(-extent * (1.0 - f64::EPSILON))
}

/// [`generate_fallback_in`] over the default `(-1000, 1000)` cube.
pub fn generate_fallback(count: usize, random: &dyn RandomSource) -> Vec<f64> {
    generate_fallback_in(count, DEFAULT_FALLBACK_EXTENT, random)
}

/// The default 800-point starfield.
pub fn default_starfield(random: &dyn RandomSource) -> Vec<f64> {
    generate_fallback(DEFAULT_FALLBACK_COUNT, random)
}
