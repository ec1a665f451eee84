pub mod config;
pub mod curve;
pub mod error;
pub mod export;
pub mod models;
pub mod sampler;
pub mod session;
pub mod table;
pub mod utils;

pub use config::Config;
pub use curve::CurveModel;
pub use error::{GradError, Result};
pub use models::point::{Channel, Point};
pub use models::style::ColourStop;
pub use sampler::{GradientSampler, reduce_stops};
