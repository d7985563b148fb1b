use std::env;

/// Application configuration loaded from environment variables. Everything
/// has a sensible default; deployments only override what they need.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store collection holding path point documents.
    pub points_collection: String,
    /// Store collection holding path edge documents.
    pub edges_collection: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            points_collection: env::var("WAYPATH_POINTS_COLLECTION")
                .unwrap_or_else(|_| "path_points".to_string()),
            edges_collection: env::var("WAYPATH_EDGES_COLLECTION")
                .unwrap_or_else(|_| "path_edges".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            points_collection: "path_points".to_string(),
            edges_collection: "path_edges".to_string(),
        }
    }
}
