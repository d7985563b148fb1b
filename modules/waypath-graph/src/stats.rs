use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::Graph;
use crate::components::connected_components;

/// Aggregate degree and weight distributions over a materialized graph.
/// Every min/max/avg over an empty vertex or edge set is 0, so callers never
/// see NaN or infinite sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphStatistics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub min_degree: usize,
    pub avg_edge_weight: f64,
    pub max_edge_weight: f64,
    pub min_edge_weight: f64,
    pub is_connected: bool,
}

pub fn statistics(graph: &Graph) -> GraphStatistics {
    let component_count = connected_components(graph).len();

    let degrees: Vec<usize> = graph.adjacency.values().map(Vec::len).collect();
    let (avg_degree, max_degree, min_degree) = if degrees.is_empty() {
        (0.0, 0, 0)
    } else {
        (
            degrees.iter().sum::<usize>() as f64 / degrees.len() as f64,
            degrees.iter().copied().max().unwrap_or(0),
            degrees.iter().copied().min().unwrap_or(0),
        )
    };

    let weights: Vec<f64> = graph.edges.iter().map(|e| e.weight).collect();
    let (avg_edge_weight, max_edge_weight, min_edge_weight) = if weights.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            weights.iter().sum::<f64>() / weights.len() as f64,
            weights.iter().copied().fold(f64::MIN, f64::max),
            weights.iter().copied().fold(f64::MAX, f64::min),
        )
    };

    GraphStatistics {
        vertex_count: graph.vertices.len(),
        edge_count: graph.edges.len(),
        component_count,
        avg_degree,
        max_degree,
        min_degree,
        avg_edge_weight,
        max_edge_weight,
        min_edge_weight,
        is_connected: component_count == 1,
    }
}
