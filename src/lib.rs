pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod net;
pub mod random;
pub mod transform;

pub use catalog::{CandidatePoint, MlResult, ParticleVertex, Prediction, VisualizationPoint};
pub use config::ServiceConfig;
pub use engine::ExoplanetDataService;
pub use error::{CatalogError, Result};
