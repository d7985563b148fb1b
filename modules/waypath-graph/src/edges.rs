use std::sync::Arc;

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use waypath_common::{
    haversine_m, normalize_pair, validate_edge, NewPathEdge, PathEdge, PathEdgePatch, WaypathError,
};
use waypath_store::{Collection, StoreError};

use crate::points::PathPointStore;

/// One adjacency hop as seen from a queried point: the opposite endpoint of
/// an edge touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Neighbor {
    pub neighbor_id: String,
    pub weight: f64,
    pub edge_id: String,
}

/// CRUD over path edge documents. Owns the edge invariants: endpoints must
/// exist, pairs are stored normalized, self-loops are rejected, and at most
/// one edge exists per unordered pair.
#[derive(Clone)]
pub struct PathEdgeStore {
    collection: Arc<dyn Collection>,
    points: PathPointStore,
}

impl PathEdgeStore {
    pub fn new(collection: Arc<dyn Collection>, points: PathPointStore) -> Self {
        Self { collection, points }
    }

    /// Create an edge. When `weight` is omitted it is derived as the
    /// haversine distance between the endpoints at creation time and never
    /// recomputed afterward, even if the endpoints later move.
    ///
    /// Uniqueness over the normalized pair is enforced by the store's atomic
    /// check-and-insert, so two racing creates for one pair cannot both
    /// succeed.
    pub async fn create(
        &self,
        new: NewPathEdge,
        creator_id: Option<&str>,
    ) -> Result<PathEdge, WaypathError> {
        let point_a = self.points.get(&new.point_a_id).await?;
        let point_b = self.points.get(&new.point_b_id).await?;

        let weight = new.weight.unwrap_or_else(|| {
            haversine_m(
                point_a.latitude,
                point_a.longitude,
                point_b.latitude,
                point_b.longitude,
            )
        });

        let (point_a_id, point_b_id) = normalize_pair(&new.point_a_id, &new.point_b_id);
        validate_edge(&point_a_id, &point_b_id, weight)?;

        let now = Utc::now();
        let mut edge = PathEdge {
            id: String::new(),
            point_a_id,
            point_b_id,
            weight,
            created_by: creator_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        let id = self
            .collection
            .insert_unique(&["point_a_id", "point_b_id"], edge.to_document()?)
            .await
            .map_err(|err| match err {
                StoreError::Conflict { .. } => WaypathError::DuplicateEdge {
                    point_a_id: edge.point_a_id.clone(),
                    point_b_id: edge.point_b_id.clone(),
                },
                other => WaypathError::Store(other),
            })?;
        edge.id = id;

        info!(
            id = %edge.id,
            point_a = %edge.point_a_id,
            point_b = %edge.point_b_id,
            weight = edge.weight,
            "created path edge"
        );
        Ok(edge)
    }

    pub async fn get(&self, id: &str) -> Result<PathEdge, WaypathError> {
        let doc = self
            .collection
            .get_by_id(id)
            .await?
            .ok_or_else(|| WaypathError::not_found("path edge", id))?;
        Ok(PathEdge::from_document(id.to_string(), doc)?)
    }

    /// The edge between two points, if any. Normalizes the pair first, so
    /// argument order does not matter. Absence is `Ok(None)`, not an error.
    pub async fn find_between(
        &self,
        point_a_id: &str,
        point_b_id: &str,
    ) -> Result<Option<PathEdge>, WaypathError> {
        let (min_id, max_id) = normalize_pair(point_a_id, point_b_id);
        // Single-field equality is all the store offers; the second endpoint
        // is matched by filtering the decoded hits.
        let hits = self
            .collection
            .query_equals("point_a_id", &Value::String(min_id))
            .await?;
        for (id, doc) in hits {
            let edge = PathEdge::from_document(id, doc)?;
            if edge.point_b_id == max_id {
                return Ok(Some(edge));
            }
        }
        Ok(None)
    }

    /// All edges, or just those touching `point_id`. The point filter is the
    /// union of two equality queries (the store has no OR), deduplicated by
    /// edge id.
    pub async fn list(&self, point_id: Option<&str>) -> Result<Vec<PathEdge>, WaypathError> {
        let Some(point_id) = point_id else {
            let mut edges = Vec::new();
            for (id, doc) in self.collection.scan_all().await? {
                edges.push(PathEdge::from_document(id, doc)?);
            }
            return Ok(edges);
        };

        let value = Value::String(point_id.to_string());
        let mut hits = self.collection.query_equals("point_a_id", &value).await?;
        hits.extend(self.collection.query_equals("point_b_id", &value).await?);

        let mut seen = std::collections::HashSet::new();
        let mut edges = Vec::new();
        for (id, doc) in hits {
            if seen.insert(id.clone()) {
                edges.push(PathEdge::from_document(id, doc)?);
            }
        }
        Ok(edges)
    }

    /// Adjacency of one point: every edge touching it, mapped to whichever
    /// endpoint is not the queried point.
    pub async fn neighbors(&self, point_id: &str) -> Result<Vec<Neighbor>, WaypathError> {
        let edges = self.list(Some(point_id)).await?;
        Ok(edges
            .into_iter()
            .map(|edge| {
                let neighbor_id = if edge.point_a_id == point_id {
                    edge.point_b_id
                } else {
                    edge.point_a_id
                };
                Neighbor {
                    neighbor_id,
                    weight: edge.weight,
                    edge_id: edge.id,
                }
            })
            .collect())
    }

    /// Merge a partial update onto an edge. A changed endpoint must exist;
    /// weight positivity and endpoint distinctness are re-validated on the
    /// merged record. Provenance is preserved, `updated_at` restamped.
    pub async fn update(&self, id: &str, patch: PathEdgePatch) -> Result<PathEdge, WaypathError> {
        let mut edge = self.get(id).await?;

        if let Some(point_a_id) = patch.point_a_id {
            if point_a_id != edge.point_a_id {
                self.points.get(&point_a_id).await?;
            }
            edge.point_a_id = point_a_id;
        }
        if let Some(point_b_id) = patch.point_b_id {
            if point_b_id != edge.point_b_id {
                self.points.get(&point_b_id).await?;
            }
            edge.point_b_id = point_b_id;
        }
        if let Some(weight) = patch.weight {
            edge.weight = weight;
        }
        validate_edge(&edge.point_a_id, &edge.point_b_id, edge.weight)?;
        edge.updated_at = Utc::now();

        self.collection
            .merge_update(
                id,
                json!({
                    "point_a_id": edge.point_a_id,
                    "point_b_id": edge.point_b_id,
                    "weight": edge.weight,
                    "updated_at": edge.updated_at,
                }),
            )
            .await?;
        Ok(edge)
    }

    pub async fn delete(&self, id: &str) -> Result<(), WaypathError> {
        self.collection.delete(id).await?;
        info!(%id, "deleted path edge");
        Ok(())
    }
}
