use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub mapbox_access_token: String,
    pub map_config: MapConfig,
    pub animation_config: AnimationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://partner.claygrounds.com".to_string(),
            mapbox_access_token: String::new(),
            map_config: MapConfig::default(),
            animation_config: AnimationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lng: f64,
    pub default_center_lat: f64,
    pub default_zoom: f64,
    pub style_url: String,
    /// Districts become visible without a state selection at this zoom.
    pub district_zoom_threshold: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lng: 78.9629, // India
            default_center_lat: 20.5937,
            default_zoom: 4.0,
            style_url: "mapbox://styles/mapbox/dark-v10".to_string(),
            district_zoom_threshold: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// fitBounds duration when entering a state.
    pub state_entry_ms: u32,
    /// flyTo duration when stepping between facilities.
    pub location_fly_ms: u32,
    /// easeTo duration back to the country overview.
    pub reset_view_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            state_entry_ms: 2000,
            location_fly_ms: 2000,
            reset_view_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or(&defaults.api_base_url)
                .to_string(),
            mapbox_access_token: option_env!("MAPBOX_ACCESS_TOKEN")
                .unwrap_or("")
                .to_string(),
            map_config: MapConfig {
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_center_lng),
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_center_lat),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_zoom),
                style_url: option_env!("MAP_STYLE_URL")
                    .unwrap_or(&defaults.map_config.style_url)
                    .to_string(),
                district_zoom_threshold: defaults.map_config.district_zoom_threshold,
            },
            animation_config: defaults.animation_config,
        }
    }

    pub fn mapbox_token(&self) -> &str {
        &self.mapbox_access_token
    }

    pub fn has_mapbox_token(&self) -> bool {
        !self.mapbox_access_token.is_empty()
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_center_on_india() {
        let config = AppConfig::default();
        assert_eq!(config.map_config.default_zoom, 4.0);
        assert_eq!(config.map_config.district_zoom_threshold, 6.0);
        assert!((config.map_config.default_center_lng - 78.9629).abs() < 1e-9);
    }
}
