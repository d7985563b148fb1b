use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::Graph;

/// A vertex reachable from the query source, with its settled path distance
/// and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NearbyPoint {
    pub id: String,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
}

struct Frontier {
    distance: f64,
    id: String,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Bounded-radius relaxation from a single source: vertices are settled in
/// distance order, and a settled vertex at or beyond `max_distance` stops
/// propagating. The result excludes the source itself, keeps only vertices
/// within the ceiling, and is sorted ascending by distance.
///
/// An unknown `start_id` yields an empty result rather than an error.
pub fn within_distance(graph: &Graph, start_id: &str, max_distance: f64) -> Vec<NearbyPoint> {
    let mut settled: HashMap<String, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        distance: 0.0,
        id: start_id.to_string(),
    });

    while let Some(Frontier { distance, id }) = heap.pop() {
        if settled.contains_key(&id) {
            continue;
        }
        settled.insert(id.clone(), distance);

        if distance >= max_distance {
            continue;
        }

        if let Some(entries) = graph.adjacency.get(&id) {
            for entry in entries {
                if !settled.contains_key(&entry.to) {
                    heap.push(Frontier {
                        distance: distance + entry.weight,
                        id: entry.to.clone(),
                    });
                }
            }
        }
    }

    let mut nearby: Vec<NearbyPoint> = settled
        .into_iter()
        .filter(|(id, distance)| *distance <= max_distance && id != start_id)
        .filter_map(|(id, distance)| {
            graph.vertex(&id).map(|v| NearbyPoint {
                id,
                distance,
                latitude: v.latitude,
                longitude: v.longitude,
            })
        })
        .collect();
    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}
