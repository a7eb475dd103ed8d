//! Pure transforms from raw catalog fields to scene attributes.
//!
//! - `coords`: two coordinate policies, passthrough for named objects and
//!   scale-plus-bounds for the particle cloud
//! - `estimate`: heuristic distance, habitability and display angles

pub mod coords;
pub mod estimate;
