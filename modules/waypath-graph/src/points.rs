use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use waypath_common::{
    validate_coordinates, BoundingBox, NewPathPoint, PathPoint, PathPointPatch, WaypathError,
};
use waypath_store::Collection;

/// CRUD over path point documents. Holds a handle to the injected store
/// collection; owns coordinate validation and timestamp stamping.
#[derive(Clone)]
pub struct PathPointStore {
    collection: Arc<dyn Collection>,
}

impl PathPointStore {
    pub fn new(collection: Arc<dyn Collection>) -> Self {
        Self { collection }
    }

    pub async fn create(
        &self,
        new: NewPathPoint,
        creator_id: Option<&str>,
    ) -> Result<PathPoint, WaypathError> {
        validate_coordinates(new.latitude, new.longitude)?;

        let now = Utc::now();
        let mut point = PathPoint {
            id: String::new(),
            latitude: new.latitude,
            longitude: new.longitude,
            created_by: creator_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        let id = self.collection.insert(point.to_document()?).await?;
        point.id = id;

        info!(id = %point.id, lat = point.latitude, lng = point.longitude, "created path point");
        Ok(point)
    }

    pub async fn get(&self, id: &str) -> Result<PathPoint, WaypathError> {
        let doc = self
            .collection
            .get_by_id(id)
            .await?
            .ok_or_else(|| WaypathError::not_found("path point", id))?;
        Ok(PathPoint::from_document(id.to_string(), doc)?)
    }

    /// All points, optionally narrowed to a bounding box. The store has no
    /// spatial index, so the filter runs after a full scan.
    pub async fn list(&self, bbox: Option<&BoundingBox>) -> Result<Vec<PathPoint>, WaypathError> {
        let mut points = Vec::new();
        for (id, doc) in self.collection.scan_all().await? {
            points.push(PathPoint::from_document(id, doc)?);
        }
        if let Some(bbox) = bbox {
            points.retain(|p| bbox.contains(p.latitude, p.longitude));
        }
        Ok(points)
    }

    /// Merge a partial update onto the existing record and re-validate the
    /// merged whole. Provenance (`created_by`, `created_at`) is preserved;
    /// `updated_at` is restamped.
    pub async fn update(
        &self,
        id: &str,
        patch: PathPointPatch,
    ) -> Result<PathPoint, WaypathError> {
        let mut point = self.get(id).await?;
        if let Some(latitude) = patch.latitude {
            point.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            point.longitude = longitude;
        }
        validate_coordinates(point.latitude, point.longitude)?;
        point.updated_at = Utc::now();

        self.collection
            .merge_update(
                id,
                serde_json::json!({
                    "latitude": point.latitude,
                    "longitude": point.longitude,
                    "updated_at": point.updated_at,
                }),
            )
            .await?;
        Ok(point)
    }

    /// Unconditional removal. Does not cascade to edges; a dangling edge is
    /// tolerated and skipped by the graph builder.
    pub async fn delete(&self, id: &str) -> Result<(), WaypathError> {
        self.collection.delete(id).await?;
        info!(%id, "deleted path point");
        Ok(())
    }
}
