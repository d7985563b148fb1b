use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use waypath_common::{PathEdge, PathPoint, WaypathError};

use crate::edges::PathEdgeStore;
use crate::points::PathPointStore;

/// One directed half of an undirected edge, as stored in the adjacency map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdjacencyEntry {
    pub to: String,
    pub weight: f64,
    pub edge_id: String,
}

/// An in-memory snapshot of the whole waypoint graph. Derived, never
/// persisted: each algorithmic query materializes its own private value and
/// drops it afterward, so concurrent queries never share graph state.
#[derive(Debug, Clone)]
pub struct Graph {
    pub vertices: Vec<PathPoint>,
    pub edges: Vec<PathEdge>,
    pub adjacency: HashMap<String, Vec<AdjacencyEntry>>,
}

impl Graph {
    pub fn vertex(&self, id: &str) -> Option<&PathPoint> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }
}

/// Materializes a [`Graph`] from the stores: all vertices, all edges, and a
/// symmetric adjacency map (both directions per edge, edges are undirected).
#[derive(Clone)]
pub struct GraphBuilder {
    points: PathPointStore,
    edges: PathEdgeStore,
}

impl GraphBuilder {
    pub fn new(points: PathPointStore, edges: PathEdgeStore) -> Self {
        Self { points, edges }
    }

    pub async fn build(&self) -> Result<Graph, WaypathError> {
        let vertices = self.points.list(None).await?;
        let edges = self.edges.list(None).await?;

        let mut adjacency: HashMap<String, Vec<AdjacencyEntry>> = vertices
            .iter()
            .map(|v| (v.id.clone(), Vec::new()))
            .collect();

        for edge in &edges {
            // Vertex deletion does not cascade, so an edge side may point at
            // a vertex that no longer exists; that side is skipped.
            match adjacency.get_mut(&edge.point_a_id) {
                Some(entries) => entries.push(AdjacencyEntry {
                    to: edge.point_b_id.clone(),
                    weight: edge.weight,
                    edge_id: edge.id.clone(),
                }),
                None => warn!(
                    edge_id = %edge.id,
                    point_id = %edge.point_a_id,
                    "edge references missing vertex, skipping adjacency side"
                ),
            }
            match adjacency.get_mut(&edge.point_b_id) {
                Some(entries) => entries.push(AdjacencyEntry {
                    to: edge.point_a_id.clone(),
                    weight: edge.weight,
                    edge_id: edge.id.clone(),
                }),
                None => warn!(
                    edge_id = %edge.id,
                    point_id = %edge.point_b_id,
                    "edge references missing vertex, skipping adjacency side"
                ),
            }
        }

        debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            "materialized waypoint graph"
        );

        Ok(Graph {
            vertices,
            edges,
            adjacency,
        })
    }
}
