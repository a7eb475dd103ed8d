use std::sync::Arc;

use serde_json::Value;

use crate::catalog::{
    self, CandidatePoint, RawCandidateRecord, RawCatalogRecord, VisualizationPoint,
    CANDIDATES_PATH, CONFIRMED_PATH,
};
use crate::config::ServiceConfig;
use crate::error::{CatalogError, Result};
use crate::fallback::generate_fallback_in;
use crate::net::fetch::CatalogClient;
use crate::net::CatalogSource;
use crate::random::{RandomSource, ThreadRandom};
use crate::transform::coords::{self, SceneScale};
use crate::transform::estimate;

/// Entry point for scene components: catalog → transforms → scene records.
///
/// Holds only its configuration, a catalog source and a random source; every
/// query builds its result from its own response, so calls may run
/// concurrently without coordination.
///
/// Two recovery strategies are in play:
/// - empty-on-failure: confirmed exoplanets and ML candidates
/// - starfield-on-failure: star particles (never returns an empty cloud)
pub struct ExoplanetDataService<S = CatalogClient> {
    source: S,
    config: ServiceConfig,
    random: Arc<dyn RandomSource>,
}

impl ExoplanetDataService<CatalogClient> {
    /// HTTP-backed service for `config.base_url`.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = CatalogClient::new(&config)?;
        Ok(Self::with_source(client, config))
    }

    /// HTTP-backed service with default settings against `base_url`.
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::new(ServiceConfig::new(base_url))
    }
}

impl<S: CatalogSource> ExoplanetDataService<S> {
    pub fn with_source(source: S, config: ServiceConfig) -> Self {
        Self {
            source,
            config,
            random: Arc::new(ThreadRandom),
        }
    }

    /// Replace the ambient random source (jitter, fallback, ML fallback).
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ── Lenient operations (recovery applied) ─────────────────────

    /// Confirmed exoplanets shaped for the scene. Empty on any failure.
    pub async fn confirmed_exoplanets(&self, limit: usize) -> Vec<VisualizationPoint> {
        empty_on_failure("confirmed exoplanets", self.try_confirmed_exoplanets(limit).await)
    }

    /// Flat `[x, y, z, ...]` particle cloud. Falls back to a synthetic
    /// starfield on any failure or when nothing usable came back.
    pub async fn star_particle_coordinates(&self, limit: usize) -> Vec<f64> {
        match self.try_star_particles(limit).await {
            Ok(vertices) => {
                log::info!("Star particles from catalog: {}", vertices.len() / 3);
                vertices
            }
            Err(e) => {
                log::error!("[{}] star particles: {}", e.phase(), e);
                self.starfield_fallback(&e)
            }
        }
    }

    /// ML-scored candidates. Empty on any failure.
    pub async fn candidates_with_ml(&self, limit: usize) -> Vec<CandidatePoint> {
        empty_on_failure("ML candidates", self.try_candidates_with_ml(limit).await)
    }

    /// The three operations with their configured default limits.
    pub async fn confirmed_exoplanets_default(&self) -> Vec<VisualizationPoint> {
        self.confirmed_exoplanets(self.config.confirmed_limit).await
    }

    pub async fn star_particle_coordinates_default(&self) -> Vec<f64> {
        self.star_particle_coordinates(self.config.particle_limit).await
    }

    pub async fn candidates_with_ml_default(&self) -> Vec<CandidatePoint> {
        self.candidates_with_ml(self.config.candidate_limit).await
    }

    // ── Strict operations (errors surfaced) ───────────────────────

    /// Any record without numeric ra/dec fails the whole batch. Unnamed
    /// records are kept with `name: None`.
    pub async fn try_confirmed_exoplanets(&self, limit: usize) -> Result<Vec<VisualizationPoint>> {
        let rows = self.fetch_rows(CONFIRMED_PATH, limit).await?;
        rows.into_iter()
            .take(limit)
            .map(|row| self.confirmed_point(catalog::decode(row)?))
            .collect()
    }

    /// Scaled particle vertices. An empty response, or one where no record
    /// survives scaling, is an error.
    pub async fn try_star_particles(&self, limit: usize) -> Result<Vec<f64>> {
        let rows = self.fetch_rows(CONFIRMED_PATH, limit).await?;
        if rows.is_empty() {
            return Err(CatalogError::Parse("catalog returned no records".to_string()));
        }

        let scale = SceneScale::new(self.config.scale_factor, self.config.scene_bound);
        let mut vertices = Vec::with_capacity(rows.len().min(limit) * 3);
        for row in rows.into_iter().take(limit) {
            match particle(row, &scale) {
                Ok(v) => vertices.extend_from_slice(&v),
                Err(e) => log::debug!("Skipping particle: {}", e),
            }
        }

        if vertices.is_empty() {
            return Err(CatalogError::Validation(
                "no record produced a usable particle".to_string(),
            ));
        }
        Ok(vertices)
    }

    /// Any record without an ML verdict fails the whole batch. Unnamed
    /// records keep `name: None`, unplaced ones `coordinates: None`.
    pub async fn try_candidates_with_ml(&self, limit: usize) -> Result<Vec<CandidatePoint>> {
        let rows = self.fetch_rows(CANDIDATES_PATH, limit).await?;
        rows.into_iter()
            .take(limit)
            .map(|row| self.candidate_point(catalog::decode(row)?))
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────

    async fn fetch_rows(&self, path: &str, limit: usize) -> Result<Vec<Value>> {
        let body = self
            .source
            .fetch_json(path, &[("limit", limit.to_string())])
            .await?;
        catalog::rows(body)
    }

    fn confirmed_point(&self, rec: RawCatalogRecord) -> Result<VisualizationPoint> {
        let name = rec.name().map(str::to_string);
        let (ra, dec) = match (rec.ra(), rec.dec()) {
            (Some(ra), Some(dec)) => (ra, dec),
            _ => {
                return Err(CatalogError::Validation(format!(
                    "{}: ra/dec missing or not numeric",
                    name.as_deref().unwrap_or("<unnamed>")
                )))
            }
        };
        let coordinates = coords::resolve(rec.cartesian(), Some(ra), Some(dec))?;

        Ok(VisualizationPoint {
            distance: estimate::simulated_distance(&coordinates, self.random.as_ref()),
            habitability: estimate::name_habitability(name.as_deref().unwrap_or_default()),
            base_direction: estimate::ra_to_azimuth(ra),
            base_elevation: estimate::dec_to_elevation(dec),
            name,
            ra,
            dec,
            coordinates,
        })
    }

    fn candidate_point(&self, rec: RawCandidateRecord) -> Result<CandidatePoint> {
        let name = rec.name().map(str::to_string);
        let ml = rec.ml_result.clone().ok_or_else(|| {
            CatalogError::Validation(format!(
                "{}: ml_result missing",
                name.as_deref().unwrap_or("<unnamed>")
            ))
        })?;
        let coordinates = coords::resolve(rec.cartesian(), rec.ra(), rec.dec()).ok();
        let random = self.random.as_ref();

        Ok(CandidatePoint {
            kepid: rec.kepid(),
            distance: coordinates
                .as_ref()
                .and_then(|c| estimate::simulated_distance(c, random)),
            habitability: estimate::ml_to_habitability(&ml, random),
            base_direction: estimate::random_direction(random),
            base_elevation: estimate::random_elevation(random),
            name,
            coordinates,
            ml_prediction: ml,
        })
    }

    fn starfield_fallback(&self, reason: &CatalogError) -> Vec<f64> {
        log::warn!(
            "Using synthetic starfield ({} points): {}",
            self.config.fallback_count,
            reason
        );
        generate_fallback_in(
            self.config.fallback_count,
            self.config.fallback_extent,
            self.random.as_ref(),
        )
    }
}

fn particle(row: Value, scale: &SceneScale) -> Result<[f64; 3]> {
    let rec: RawCatalogRecord = catalog::decode(row)?;
    let (x, y, z) = rec
        .cartesian()
        .ok_or_else(|| CatalogError::Validation("X/Y/Z missing or not numeric".to_string()))?;
    scale.apply(x, y, z).ok_or_else(|| {
        CatalogError::Validation(format!("({}, {}, {}) outside scene bound", x, y, z))
    })
}

fn empty_on_failure<T>(operation: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("[{}] {}: {}", e.phase(), operation, e);
        Vec::new()
    })
}
