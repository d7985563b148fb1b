use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::WaypathError;

// --- Records ---

/// A geolocated graph vertex. The id is assigned by the store and lives as
/// the document key, not inside the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An undirected weighted edge between two path points. Endpoints are stored
/// in lexicographic order (`point_a_id < point_b_id`) so edge identity does
/// not depend on creation argument order. Weight is meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathEdge {
    pub id: String,
    pub point_a_id: String,
    pub point_b_id: String,
    pub weight: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PathPoint {
    pub fn from_document(id: String, mut doc: Value) -> Result<Self, serde_json::Error> {
        doc["id"] = Value::String(id);
        serde_json::from_value(doc)
    }

    /// Document body for persistence: every field except the id.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = serde_json::to_value(self)?;
        if let Some(obj) = doc.as_object_mut() {
            obj.remove("id");
        }
        Ok(doc)
    }
}

impl PathEdge {
    pub fn from_document(id: String, mut doc: Value) -> Result<Self, serde_json::Error> {
        doc["id"] = Value::String(id);
        serde_json::from_value(doc)
    }

    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = serde_json::to_value(self)?;
        if let Some(obj) = doc.as_object_mut() {
            obj.remove("id");
        }
        Ok(doc)
    }
}

// --- Inputs ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct NewPathPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Partial update for a path point: absent fields keep their current value.
/// The merged record is re-validated as a whole.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct PathPointPatch {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewPathEdge {
    pub point_a_id: String,
    pub point_b_id: String,
    /// Meters. Derived via haversine from the endpoints when omitted; never
    /// recomputed afterward.
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PathEdgePatch {
    pub point_a_id: Option<String>,
    pub point_b_id: Option<String>,
    pub weight: Option<f64>,
}

// --- Geo filter ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

// --- Validation (pure; timestamping is the store components' job) ---

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WaypathError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(WaypathError::Validation(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(WaypathError::Validation(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

pub fn validate_edge(point_a_id: &str, point_b_id: &str, weight: f64) -> Result<(), WaypathError> {
    if point_a_id.is_empty() || point_b_id.is_empty() {
        return Err(WaypathError::Validation(
            "edge endpoint ids must be non-empty".to_string(),
        ));
    }
    if point_a_id == point_b_id {
        return Err(WaypathError::Validation(format!(
            "edge endpoints must be distinct, got {point_a_id} twice"
        )));
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(WaypathError::Validation(format!(
            "edge weight must be a positive number of meters, got {weight}"
        )));
    }
    Ok(())
}

/// Order an endpoint pair lexicographically so edge identity is independent
/// of the caller's argument order.
pub fn normalize_pair(point_a_id: &str, point_b_id: &str) -> (String, String) {
    if point_a_id <= point_b_id {
        (point_a_id.to_string(), point_b_id.to_string())
    } else {
        (point_b_id.to_string(), point_a_id.to_string())
    }
}
