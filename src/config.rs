//! Service configuration.
//!
//! Every scene constant the pipeline depends on lives here with its default,
//! so call sites never re-derive them.

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Multiplier applied to catalog X/Y/Z on the particle path.
pub const DEFAULT_SCALE_FACTOR: f64 = 100.0;
/// Exclusive bound on each scaled axis.
pub const DEFAULT_SCENE_BOUND: f64 = 2000.0;
/// Synthetic starfield size.
pub const DEFAULT_FALLBACK_COUNT: usize = 800;
/// Half-width of the synthetic starfield cube.
pub const DEFAULT_FALLBACK_EXTENT: f64 = 1000.0;

pub const DEFAULT_CONFIRMED_LIMIT: usize = 50;
pub const DEFAULT_PARTICLE_LIMIT: usize = 1000;
pub const DEFAULT_CANDIDATE_LIMIT: usize = 20;

/// Configuration for [`crate::engine::ExoplanetDataService`] and
/// [`crate::net::fetch::CatalogClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub scale_factor: f64,
    pub scene_bound: f64,
    pub fallback_count: usize,
    pub fallback_extent: f64,
    pub confirmed_limit: usize,
    pub particle_limit: usize,
    pub candidate_limit: usize,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            scene_bound: DEFAULT_SCENE_BOUND,
            fallback_count: DEFAULT_FALLBACK_COUNT,
            fallback_extent: DEFAULT_FALLBACK_EXTENT,
            confirmed_limit: DEFAULT_CONFIRMED_LIMIT,
            particle_limit: DEFAULT_PARTICLE_LIMIT,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            user_agent: concat!("exoplanet-sky/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_scene_bound(mut self, scene_bound: f64) -> Self {
        self.scene_bound = scene_bound;
        self
    }

    /// Set the synthetic starfield size (points, not floats).
    pub fn with_fallback_count(mut self, count: usize) -> Self {
        self.fallback_count = count;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
