use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use waypath_common::{haversine_m, WaypathError};

use crate::builder::Graph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathCoordinate {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of a shortest-path query. "No route" is a normal result, not an
/// error: `found` is false, `distance` is infinite, `path` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShortestPathResult {
    pub found: bool,
    pub distance: f64,
    pub path: Vec<String>,
    pub path_with_coords: Vec<PathCoordinate>,
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first.
/// Weights are validated finite, so `total_cmp` never sees NaN.
struct Candidate {
    distance: f64,
    id: String,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Dijkstra over the materialized graph. Fails with `NotFound` when either
/// endpoint is absent from the adjacency map. Ties between equal-distance
/// candidates break arbitrarily; callers must not depend on a specific
/// tie-break.
pub fn shortest_path(
    graph: &Graph,
    start_id: &str,
    end_id: &str,
) -> Result<ShortestPathResult, WaypathError> {
    if !graph.contains(start_id) {
        return Err(WaypathError::not_found("path point", start_id));
    }
    if !graph.contains(end_id) {
        return Err(WaypathError::not_found("path point", end_id));
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut previous: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start_id, 0.0);
    heap.push(Candidate {
        distance: 0.0,
        id: start_id.to_string(),
    });

    while let Some(Candidate { distance, id }) = heap.pop() {
        let Some((current, _)) = graph.adjacency.get_key_value(id.as_str()) else {
            continue;
        };
        let current = current.as_str();
        if !visited.insert(current) {
            continue;
        }
        if current == end_id {
            break;
        }

        for entry in &graph.adjacency[current] {
            if visited.contains(entry.to.as_str()) {
                continue;
            }
            let next = distance + entry.weight;
            let best = distances
                .get(entry.to.as_str())
                .copied()
                .unwrap_or(f64::INFINITY);
            if next < best {
                // Borrow the key from the adjacency map so the maps can hold
                // &str for the life of the search.
                let Some((to, _)) = graph.adjacency.get_key_value(entry.to.as_str()) else {
                    continue;
                };
                distances.insert(to.as_str(), next);
                previous.insert(to.as_str(), current);
                heap.push(Candidate {
                    distance: next,
                    id: entry.to.clone(),
                });
            }
        }
    }

    // Walk predecessor links backward from the target.
    let mut path = vec![end_id.to_string()];
    let mut cursor = end_id;
    while let Some(prev) = previous.get(cursor) {
        path.push((*prev).to_string());
        cursor = *prev;
    }
    path.reverse();

    if path.first().map(String::as_str) != Some(start_id) {
        return Ok(ShortestPathResult {
            found: false,
            distance: f64::INFINITY,
            path: Vec::new(),
            path_with_coords: Vec::new(),
        });
    }

    let path_with_coords = path
        .iter()
        .filter_map(|id| {
            graph.vertex(id).map(|v| PathCoordinate {
                id: v.id.clone(),
                latitude: v.latitude,
                longitude: v.longitude,
            })
        })
        .collect();

    Ok(ShortestPathResult {
        found: true,
        distance: distances.get(end_id).copied().unwrap_or(f64::INFINITY),
        path,
        path_with_coords,
    })
}

/// Whether any route exists between two points.
pub fn are_connected(graph: &Graph, point_a_id: &str, point_b_id: &str) -> Result<bool, WaypathError> {
    Ok(shortest_path(graph, point_a_id, point_b_id)?.found)
}

/// Total haversine distance along an arbitrary sequence of point ids,
/// regardless of whether consecutive points share an edge. Fewer than two
/// ids is a zero-length path.
pub fn path_distance(graph: &Graph, point_ids: &[String]) -> Result<f64, WaypathError> {
    if point_ids.len() < 2 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for pair in point_ids.windows(2) {
        let a = graph
            .vertex(&pair[0])
            .ok_or_else(|| WaypathError::not_found("path point", pair[0].clone()))?;
        let b = graph
            .vertex(&pair[1])
            .ok_or_else(|| WaypathError::not_found("path point", pair[1].clone()))?;
        total += haversine_m(a.latitude, a.longitude, b.latitude, b.longitude);
    }
    Ok(total)
}
