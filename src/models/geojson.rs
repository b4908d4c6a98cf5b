use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Feature properties as delivered by the boundary files (`st_nm`,
/// `district`, `population_rank`, ...). Kept schemaless because the three
/// resources carry different keys.
pub type Properties = serde_json::Map<String, Value>;

/// A GeoJSON feature collection. Treated as read-only after fetch; `refetch`
/// replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Properties,
    pub geometry: Value,
}

impl FeatureCollection {
    pub fn is_valid(&self) -> bool {
        self.collection_type == "FeatureCollection"
    }

    /// String property values across all features, deduplicated and sorted.
    pub fn property_values(&self, key: &str) -> Vec<String> {
        let mut values: Vec<String> = self
            .features
            .iter()
            .filter_map(|f| f.properties.get(key))
            .filter_map(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
            .collect();
        values.sort();
        values.dedup();
        values
    }
}

impl Feature {
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(states: &[&str]) -> FeatureCollection {
        FeatureCollection {
            collection_type: "FeatureCollection".to_string(),
            features: states
                .iter()
                .map(|name| Feature {
                    feature_type: "Feature".to_string(),
                    id: None,
                    properties: json!({ "st_nm": name })
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                    geometry: json!({ "type": "Point", "coordinates": [0.0, 0.0] }),
                })
                .collect(),
        }
    }

    #[test]
    fn property_values_dedupes_and_sorts() {
        let data = collection(&["Kerala", "Delhi", "Kerala", " ", "Assam"]);
        assert_eq!(data.property_values("st_nm"), vec!["Assam", "Delhi", "Kerala"]);
    }

    #[test]
    fn deserializes_feature_collection() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "st_nm": "Delhi", "st_code": "07" },
                "geometry": { "type": "Polygon", "coordinates": [] }
            }]
        });
        let data: FeatureCollection = serde_json::from_value(raw).unwrap();
        assert!(data.is_valid());
        assert_eq!(data.features.len(), 1);
        assert_eq!(data.features[0].property_str("st_nm"), Some("Delhi"));
    }
}
