use std::sync::Arc;

use waypath_common::{
    BoundingBox, Config, NewPathEdge, NewPathPoint, PathEdge, PathEdgePatch, PathPoint,
    PathPointPatch, WaypathError,
};
use waypath_store::{Collection, MemoryStore};

use crate::builder::GraphBuilder;
use crate::components::connected_components;
use crate::edges::{Neighbor, PathEdgeStore};
use crate::points::PathPointStore;
use crate::proximity::{within_distance, NearbyPoint};
use crate::routing::{are_connected, path_distance, shortest_path, ShortestPathResult};
use crate::stats::{statistics, GraphStatistics};

/// The surface exposed upward to the transport layer: one method per public
/// operation, plain arguments in, plain results or [`WaypathError`] out.
///
/// Every algorithmic query materializes its own fresh graph. Nothing is
/// cached between calls, so concurrent queries never share graph state, at
/// the cost of redundant store reads under load.
#[derive(Clone)]
pub struct PathGraphService {
    points: PathPointStore,
    edges: PathEdgeStore,
    builder: GraphBuilder,
}

impl PathGraphService {
    pub fn new(
        points_collection: Arc<dyn Collection>,
        edges_collection: Arc<dyn Collection>,
    ) -> Self {
        let points = PathPointStore::new(points_collection);
        let edges = PathEdgeStore::new(edges_collection, points.clone());
        let builder = GraphBuilder::new(points.clone(), edges.clone());
        Self {
            points,
            edges,
            builder,
        }
    }

    /// Wire the service to a memory store using the configured collection
    /// names.
    pub fn with_store(store: &MemoryStore, config: &Config) -> Self {
        Self::new(
            Arc::new(store.collection(&config.points_collection)),
            Arc::new(store.collection(&config.edges_collection)),
        )
    }

    // --- Path points ---

    pub async fn create_point(
        &self,
        new: NewPathPoint,
        creator_id: Option<&str>,
    ) -> Result<PathPoint, WaypathError> {
        self.points.create(new, creator_id).await
    }

    pub async fn point(&self, id: &str) -> Result<PathPoint, WaypathError> {
        self.points.get(id).await
    }

    pub async fn list_points(
        &self,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<PathPoint>, WaypathError> {
        self.points.list(bbox).await
    }

    pub async fn update_point(
        &self,
        id: &str,
        patch: PathPointPatch,
    ) -> Result<PathPoint, WaypathError> {
        self.points.update(id, patch).await
    }

    pub async fn delete_point(&self, id: &str) -> Result<(), WaypathError> {
        self.points.delete(id).await
    }

    // --- Path edges ---

    pub async fn create_edge(
        &self,
        new: NewPathEdge,
        creator_id: Option<&str>,
    ) -> Result<PathEdge, WaypathError> {
        self.edges.create(new, creator_id).await
    }

    pub async fn edge(&self, id: &str) -> Result<PathEdge, WaypathError> {
        self.edges.get(id).await
    }

    pub async fn find_edge_between(
        &self,
        point_a_id: &str,
        point_b_id: &str,
    ) -> Result<Option<PathEdge>, WaypathError> {
        self.edges.find_between(point_a_id, point_b_id).await
    }

    pub async fn list_edges(&self, point_id: Option<&str>) -> Result<Vec<PathEdge>, WaypathError> {
        self.edges.list(point_id).await
    }

    pub async fn neighbors(&self, point_id: &str) -> Result<Vec<Neighbor>, WaypathError> {
        self.edges.neighbors(point_id).await
    }

    pub async fn update_edge(
        &self,
        id: &str,
        patch: PathEdgePatch,
    ) -> Result<PathEdge, WaypathError> {
        self.edges.update(id, patch).await
    }

    pub async fn delete_edge(&self, id: &str) -> Result<(), WaypathError> {
        self.edges.delete(id).await
    }

    // --- Graph queries (each on a fresh materialization) ---

    pub async fn shortest_path(
        &self,
        start_id: &str,
        end_id: &str,
    ) -> Result<ShortestPathResult, WaypathError> {
        let graph = self.builder.build().await?;
        shortest_path(&graph, start_id, end_id)
    }

    pub async fn are_connected(
        &self,
        point_a_id: &str,
        point_b_id: &str,
    ) -> Result<bool, WaypathError> {
        let graph = self.builder.build().await?;
        are_connected(&graph, point_a_id, point_b_id)
    }

    pub async fn within_distance(
        &self,
        start_id: &str,
        max_distance: f64,
    ) -> Result<Vec<NearbyPoint>, WaypathError> {
        let graph = self.builder.build().await?;
        Ok(within_distance(&graph, start_id, max_distance))
    }

    pub async fn connected_components(&self) -> Result<Vec<Vec<String>>, WaypathError> {
        let graph = self.builder.build().await?;
        Ok(connected_components(&graph))
    }

    pub async fn statistics(&self) -> Result<GraphStatistics, WaypathError> {
        let graph = self.builder.build().await?;
        Ok(statistics(&graph))
    }

    pub async fn path_distance(&self, point_ids: &[String]) -> Result<f64, WaypathError> {
        let graph = self.builder.build().await?;
        path_distance(&graph, point_ids)
    }
}
