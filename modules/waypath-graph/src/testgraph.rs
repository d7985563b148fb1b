//! Hand-built graph fixtures for the algorithm unit tests.

use std::collections::HashMap;

use chrono::Utc;

use waypath_common::{PathEdge, PathPoint};

use crate::builder::{AdjacencyEntry, Graph};

/// Build a graph directly from `(id, lat, lng)` vertices and
/// `(a, b, weight)` edges, bypassing the stores.
pub(crate) fn graph(vertices: &[(&str, f64, f64)], edges: &[(&str, &str, f64)]) -> Graph {
    let now = Utc::now();
    let vertices: Vec<PathPoint> = vertices
        .iter()
        .map(|(id, lat, lng)| PathPoint {
            id: (*id).to_string(),
            latitude: *lat,
            longitude: *lng,
            created_by: None,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let edges: Vec<PathEdge> = edges
        .iter()
        .enumerate()
        .map(|(i, (a, b, weight))| PathEdge {
            id: format!("edge-{i}"),
            point_a_id: (*a).to_string(),
            point_b_id: (*b).to_string(),
            weight: *weight,
            created_by: None,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let mut adjacency: HashMap<String, Vec<AdjacencyEntry>> = vertices
        .iter()
        .map(|v| (v.id.clone(), Vec::new()))
        .collect();
    for edge in &edges {
        if let Some(entries) = adjacency.get_mut(&edge.point_a_id) {
            entries.push(AdjacencyEntry {
                to: edge.point_b_id.clone(),
                weight: edge.weight,
                edge_id: edge.id.clone(),
            });
        }
        if let Some(entries) = adjacency.get_mut(&edge.point_b_id) {
            entries.push(AdjacencyEntry {
                to: edge.point_a_id.clone(),
                weight: edge.weight,
                edge_id: edge.id.clone(),
            });
        }
    }

    Graph {
        vertices,
        edges,
        adjacency,
    }
}
