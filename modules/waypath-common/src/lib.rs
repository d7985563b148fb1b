pub mod config;
pub mod distance;
pub mod error;
pub mod types;

pub use config::Config;
pub use distance::haversine_m;
pub use error::WaypathError;
pub use types::*;
