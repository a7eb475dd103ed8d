pub mod service;

pub use service::ExoplanetDataService;
