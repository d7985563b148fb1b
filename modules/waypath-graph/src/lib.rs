pub mod builder;
pub mod components;
pub mod edges;
pub mod points;
pub mod proximity;
pub mod routing;
pub mod service;
pub mod stats;

#[cfg(test)]
pub(crate) mod testgraph;

pub use builder::{AdjacencyEntry, Graph, GraphBuilder};
pub use components::connected_components;
pub use edges::{Neighbor, PathEdgeStore};
pub use points::PathPointStore;
pub use proximity::{within_distance, NearbyPoint};
pub use routing::{are_connected, path_distance, shortest_path, PathCoordinate, ShortestPathResult};
pub use service::PathGraphService;
pub use stats::{statistics, GraphStatistics};
