//! GeoJSON fetching with TTL caching and a process-wide last-known-good
//! snapshot per resource.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Duration;
use gloo_net::http::Request;

use crate::error::AppError;
use crate::models::FeatureCollection;
use crate::services::cache_service::{ttl_long, ttl_medium, DataCache};
use crate::utils::constants::PROP_STATE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoResource {
    States,
    Districts,
    Cities,
}

impl GeoResource {
    pub fn path(&self) -> &'static str {
        match self {
            GeoResource::States => "/india_states.geojson",
            GeoResource::Districts => "/india_districts.geojson",
            GeoResource::Cities => "/india_cities.geojson",
        }
    }

    /// Boundary files change essentially never; cities a little more often.
    pub fn ttl(&self) -> Duration {
        match self {
            GeoResource::States | GeoResource::Districts => ttl_long(),
            GeoResource::Cities => ttl_medium(),
        }
    }

    fn cache_key(&self) -> String {
        format!("geojson_{}", self.path())
    }
}

thread_local! {
    static GEO_CACHE: RefCell<DataCache<Rc<FeatureCollection>>> =
        RefCell::new(DataCache::new(ttl_long()));
    // Last-known-good snapshot per resource, read by helpers that have no
    // access to hook state. Overwritten on every successful fetch.
    static SNAPSHOTS: RefCell<HashMap<GeoResource, Rc<FeatureCollection>>> =
        RefCell::new(HashMap::new());
}

/// Fetch a GeoJSON resource, serving from cache inside the TTL window unless
/// `force_refresh` is set.
pub async fn fetch_geo_data(
    resource: GeoResource,
    force_refresh: bool,
) -> Result<Rc<FeatureCollection>, AppError> {
    if !force_refresh {
        let cached = GEO_CACHE
            .with(|c| c.borrow_mut().get(&resource.cache_key(), Some(resource.ttl())));
        if let Some(data) = cached {
            log::info!("🗺️ Using cached data for {}", resource.path());
            return Ok(data);
        }
    }

    log::info!("🗺️ Fetching GeoJSON data from {}", resource.path());

    let response = Request::get(resource.path())
        .send()
        .await
        .map_err(|e| AppError::Fetch(format!("Network error: {}", e)))?;

    if !response.ok() {
        return Err(AppError::Fetch(format!(
            "HTTP {}: {}",
            response.status(),
            response.status_text()
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| AppError::Fetch(format!("Body read error: {}", e)))?;

    let data = parse_feature_collection(&text)?;

    log::info!(
        "✅ GeoJSON loaded: {} features from {}",
        data.features.len(),
        resource.path()
    );

    let data = Rc::new(data);
    GEO_CACHE.with(|c| c.borrow_mut().set(&resource.cache_key(), data.clone()));
    SNAPSHOTS.with(|s| {
        s.borrow_mut().insert(resource, data.clone());
    });

    Ok(data)
}

/// Validate shape before accepting the payload: must be a FeatureCollection
/// with an array of features.
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::MalformedData(format!("Invalid JSON: {}", e)))?;

    if value.get("type").and_then(|t| t.as_str()) != Some("FeatureCollection")
        || !value.get("features").map(|f| f.is_array()).unwrap_or(false)
    {
        return Err(AppError::MalformedData("Invalid GeoJSON format".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::MalformedData(format!("Invalid GeoJSON format: {}", e)))
}

/// State names from the last-known-good states snapshot, sorted.
pub fn available_states_from_data() -> Vec<String> {
    SNAPSHOTS.with(|s| {
        s.borrow()
            .get(&GeoResource::States)
            .map(|data| data.property_values(PROP_STATE_NAME))
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_feature_collection() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"st_nm": "Delhi"},
                 "geometry": {"type": "Polygon", "coordinates": []}}
            ]
        }"#;
        let data = parse_feature_collection(raw).unwrap();
        assert_eq!(data.features.len(), 1);
    }

    #[test]
    fn rejects_wrong_type() {
        let raw = r#"{"type": "Feature", "features": []}"#;
        assert!(matches!(
            parse_feature_collection(raw),
            Err(AppError::MalformedData(_))
        ));
    }

    #[test]
    fn rejects_missing_features_array() {
        let raw = r#"{"type": "FeatureCollection", "features": "nope"}"#;
        assert!(matches!(
            parse_feature_collection(raw),
            Err(AppError::MalformedData(_))
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_feature_collection("{truncated"),
            Err(AppError::MalformedData(_))
        ));
    }
}
