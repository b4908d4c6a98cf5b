use serde::{Deserialize, Deserializer, Serialize};

/// A ClayGrounds facility as returned by `/api/locations/all`.
///
/// The API is loose about numeric fields: coordinates arrive as numbers,
/// numeric strings, or null depending on the record's age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub location_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub management_status: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub google_business_name: Option<String>,
    #[serde(default)]
    pub opening_date: Option<String>,
}

impl Location {
    /// Operational status with the legacy `current_status` fallback.
    pub fn status(&self) -> &str {
        self.operational_status
            .as_deref()
            .or(self.current_status.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn is_active(&self) -> bool {
        self.status() == "Active"
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Accept numbers, numeric strings, or null for coordinate fields.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => Ok(s.trim().parse::<f64>().ok()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_string_coordinates() {
        let loc: Location = serde_json::from_value(json!({
            "location_name": "Chattarpur",
            "latitude": "28.6139",
            "longitude": 77.2090,
            "state": "Delhi"
        }))
        .unwrap();
        assert!(loc.has_coordinates());
        assert!((loc.latitude.unwrap() - 28.6139).abs() < 1e-9);
    }

    #[test]
    fn status_falls_back_to_current_status() {
        let loc: Location = serde_json::from_value(json!({
            "location_name": "Gurgaon Arena",
            "current_status": "Active"
        }))
        .unwrap();
        assert_eq!(loc.status(), "Active");
        assert!(loc.is_active());
        assert!(!loc.has_coordinates());
    }

    #[test]
    fn unparseable_coordinate_becomes_none() {
        let loc: Location = serde_json::from_value(json!({
            "location_name": "Broken",
            "latitude": "not-a-number",
            "longitude": null
        }))
        .unwrap();
        assert_eq!(loc.latitude, None);
        assert_eq!(loc.longitude, None);
    }
}
