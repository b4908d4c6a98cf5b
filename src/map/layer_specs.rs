//! Static layer definitions and the filter-expression policy that drives
//! them. Everything here is plain data (`serde_json::Value` expressions);
//! conversion to JS happens at the FFI edge, which keeps this module
//! testable off the map.

use serde_json::{json, Value};

use crate::utils::constants::{
    LAYER_CITIES_LABELS, LAYER_CITIES_POINTS, LAYER_DISTRICT_BOUNDARIES, LAYER_DISTRICT_FILL,
    LAYER_DISTRICT_LABELS, LAYER_STATE_BOUNDARIES, LAYER_STATE_HIGHLIGHT, LAYER_STATE_OUTLINE,
    PROP_CITY_STATE, PROP_DISTRICT_NAME, PROP_POPULATION_RANK, PROP_STATE_NAME,
};

/// A declarative style layer bound to one named source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: &'static str,
    pub layer_type: &'static str,
    pub paint: Value,
    pub layout: Value,
    pub filter: Option<Value>,
}

impl LayerSpec {
    /// The full layer definition as Mapbox expects it.
    pub fn to_json(&self, source_id: &str) -> Value {
        let mut layer = json!({
            "id": self.id,
            "type": self.layer_type,
            "source": source_id,
            "paint": self.paint,
        });
        if !self.layout.is_null() {
            layer["layout"] = self.layout.clone();
        }
        if let Some(filter) = &self.filter {
            layer["filter"] = filter.clone();
        }
        layer
    }
}

/// Equality filter on the state-name property.
pub fn state_name_filter(state_name: &str) -> Value {
    json!(["==", ["get", PROP_STATE_NAME], state_name])
}

/// A filter no feature matches; used to blank a layer without hiding it.
pub fn match_none_filter() -> Value {
    state_name_filter("")
}

/// Matches every district feature (anything with a non-empty state name).
pub fn all_districts_filter() -> Value {
    json!(["!=", ["get", PROP_STATE_NAME], ""])
}

pub fn state_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            id: LAYER_STATE_HIGHLIGHT,
            layer_type: "fill",
            paint: json!({
                "fill-color": "#000000",
                "fill-opacity": 0.2,
            }),
            layout: Value::Null,
            filter: None,
        },
        LayerSpec {
            id: LAYER_STATE_BOUNDARIES,
            layer_type: "line",
            paint: json!({
                "line-color": "#013540",
                "line-width": 2,
                "line-opacity": 0.8,
            }),
            layout: Value::Null,
            filter: None,
        },
        LayerSpec {
            id: LAYER_STATE_OUTLINE,
            layer_type: "line",
            paint: json!({
                "line-color": "#809AA0",
                "line-width": 4,
                "line-opacity": 0.9,
            }),
            layout: Value::Null,
            // Hidden until a state is hovered
            filter: Some(match_none_filter()),
        },
    ]
}

pub fn district_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            id: LAYER_DISTRICT_FILL,
            layer_type: "fill",
            paint: json!({
                "fill-color": "#3b82f6",
                // Invisible until a district is selected; see selected_fill_opacity
                "fill-opacity": 0,
            }),
            layout: Value::Null,
            filter: Some(match_none_filter()),
        },
        LayerSpec {
            id: LAYER_DISTRICT_BOUNDARIES,
            layer_type: "line",
            paint: json!({
                "line-color": "#d23a35",
                "line-width": 2,
                "line-opacity": 0.8,
            }),
            layout: json!({
                "line-join": "round",
                "line-cap": "round",
            }),
            filter: Some(match_none_filter()),
        },
        LayerSpec {
            id: LAYER_DISTRICT_LABELS,
            layer_type: "symbol",
            paint: json!({
                "text-color": "#1e40af",
                "text-halo-color": "#ffffff",
                "text-halo-width": 2,
                "text-opacity": ["interpolate", ["linear"], ["zoom"], 6, 0, 8, 1],
            }),
            layout: json!({
                "text-field": ["get", "district"],
                "text-font": ["Open Sans Semibold", "Arial Unicode MS Bold"],
                "text-size": 12,
                "text-anchor": "center",
                "text-allow-overlap": false,
                "text-ignore-placement": false,
            }),
            filter: Some(match_none_filter()),
        },
    ]
}

pub fn city_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            id: LAYER_CITIES_POINTS,
            layer_type: "circle",
            paint: json!({
                "circle-radius": ["interpolate", ["linear"], ["zoom"], 4, 3, 8, 6, 12, 10],
                "circle-color": [
                    "case",
                    ["<=", ["get", PROP_POPULATION_RANK], 10], "#ef4444",
                    ["<=", ["get", PROP_POPULATION_RANK], 50], "#f97316",
                    "#64748b"
                ],
                "circle-stroke-color": "#ffffff",
                "circle-stroke-width": 1,
                "circle-opacity": 0.8,
            }),
            layout: Value::Null,
            filter: None,
        },
        LayerSpec {
            id: LAYER_CITIES_LABELS,
            layer_type: "symbol",
            paint: json!({
                "text-color": "#00cc81",
                "text-halo-color": "#ffffff",
                "text-halo-width": 1,
            }),
            layout: json!({
                "text-field": ["get", "name"],
                "text-font": ["Open Sans Semibold", "Arial Unicode MS Bold"],
                "text-size": ["interpolate", ["linear"], ["zoom"], 4, 8, 8, 12, 12, 16],
                "text-offset": [0, 1.5],
                "text-anchor": "top",
                "text-allow-overlap": false,
                "text-ignore-placement": false,
            }),
            filter: Some(city_labels_zoom_filter()),
        },
    ]
}

/// Visibility policy for district layers when they are enabled at all.
#[derive(Debug, Clone, PartialEq)]
pub enum DistrictVisibility {
    /// A state is selected; show only its districts.
    Selected(String),
    /// No selection, but zoomed in far enough to show everything.
    All,
    /// No selection and zoomed out; layers are hidden.
    Hidden,
}

impl DistrictVisibility {
    /// Three-tier policy: selected state wins; otherwise the zoom threshold
    /// decides.
    pub fn for_view(selected_state: Option<&str>, zoom: f64, threshold: f64) -> Self {
        match selected_state {
            Some(state) => DistrictVisibility::Selected(state.to_string()),
            None if zoom >= threshold => DistrictVisibility::All,
            None => DistrictVisibility::Hidden,
        }
    }

    pub fn filter(&self) -> Value {
        match self {
            DistrictVisibility::Selected(state) => state_name_filter(state),
            DistrictVisibility::All => all_districts_filter(),
            DistrictVisibility::Hidden => match_none_filter(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, DistrictVisibility::Hidden)
    }
}

/// Population-rank bucket for the cities layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityFilter {
    All,
    Top10,
    Top50,
    Metros,
}

impl CityFilter {
    pub fn rank_cutoff(&self) -> Option<u32> {
        match self {
            CityFilter::All => None,
            CityFilter::Top10 => Some(10),
            CityFilter::Top50 => Some(50),
            // Metros are assumed to be the top 10
            CityFilter::Metros => Some(10),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CityFilter::All => "All Cities",
            CityFilter::Top10 => "Top 10",
            CityFilter::Top50 => "Top 50",
            CityFilter::Metros => "Metros",
        }
    }
}

/// Conjunction of the rank bucket and the optional state equality filter.
/// `None` means no filtering at all.
pub fn city_filter_expr(filter: CityFilter, selected_state: Option<&str>) -> Option<Value> {
    let rank = filter
        .rank_cutoff()
        .map(|cutoff| json!(["<=", ["get", PROP_POPULATION_RANK], cutoff]));
    let state = selected_state.map(|name| json!(["==", ["get", PROP_CITY_STATE], name]));

    match (rank, state) {
        (Some(r), Some(s)) => Some(json!(["all", r, s])),
        (Some(r), None) => Some(r),
        (None, Some(s)) => Some(s),
        (None, None) => None,
    }
}

/// Opacity expression that lights up one district by name.
pub fn selected_fill_opacity(district_name: Option<&str>) -> Value {
    match district_name {
        Some(name) => json!([
            "case",
            ["==", ["get", PROP_DISTRICT_NAME], name], 0.3,
            0
        ]),
        None => json!(0),
    }
}

/// Zoom-tiered rank cutoff for city labels: top 10 below zoom 6, top 25
/// below zoom 8, everything above.
pub fn city_labels_zoom_filter() -> Value {
    json!([
        "case",
        ["<", ["zoom"], 6], ["<=", ["get", PROP_POPULATION_RANK], 10],
        ["<", ["zoom"], 8], ["<=", ["get", PROP_POPULATION_RANK], 25],
        true
    ])
}

/// Label filter: the zoom tiering ANDed with whatever rank/state filter is
/// active.
pub fn city_labels_filter(filter: CityFilter, selected_state: Option<&str>) -> Value {
    match city_filter_expr(filter, selected_state) {
        Some(active) => json!(["all", city_labels_zoom_filter(), active]),
        None => city_labels_zoom_filter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_visibility_is_zoom_tiered() {
        // No selection: hidden below the threshold, visible at and above it
        let hidden = DistrictVisibility::for_view(None, 5.9, 6.0);
        assert_eq!(hidden, DistrictVisibility::Hidden);
        assert!(!hidden.is_visible());

        assert_eq!(DistrictVisibility::for_view(None, 6.0, 6.0), DistrictVisibility::All);
        assert_eq!(DistrictVisibility::for_view(None, 10.0, 6.0), DistrictVisibility::All);
    }

    #[test]
    fn district_visibility_selection_wins_over_zoom() {
        let vis = DistrictVisibility::for_view(Some("Kerala"), 3.0, 6.0);
        assert_eq!(vis, DistrictVisibility::Selected("Kerala".to_string()));
        assert_eq!(vis.filter(), state_name_filter("Kerala"));
    }

    #[test]
    fn city_filter_combines_rank_and_state() {
        let filter = city_filter_expr(CityFilter::Top10, Some("Karnataka")).unwrap();
        assert_eq!(
            filter,
            serde_json::json!([
                "all",
                ["<=", ["get", "population_rank"], 10],
                ["==", ["get", "state"], "Karnataka"]
            ])
        );
    }

    #[test]
    fn city_filter_all_without_state_is_unfiltered() {
        assert_eq!(city_filter_expr(CityFilter::All, None), None);
    }

    #[test]
    fn city_filter_metros_matches_top10_cutoff() {
        assert_eq!(CityFilter::Metros.rank_cutoff(), CityFilter::Top10.rank_cutoff());
    }

    #[test]
    fn city_labels_filter_keeps_zoom_tiering_with_active_filter() {
        let labels = city_labels_filter(CityFilter::Top50, Some("Kerala"));
        let arr = labels.as_array().unwrap();
        assert_eq!(arr[0], "all");
        assert_eq!(arr[1], city_labels_zoom_filter());
    }

    #[test]
    fn layer_spec_serializes_with_source() {
        let specs = state_layers();
        let layer = specs[2].to_json("india-states");
        assert_eq!(layer["id"], "state-outline");
        assert_eq!(layer["source"], "india-states");
        assert_eq!(layer["filter"], match_none_filter());
        // fill/line layers without layout must not emit a null layout key
        assert!(specs[0].to_json("india-states").get("layout").is_none());
    }

    #[test]
    fn selected_district_opacity_targets_one_name() {
        assert_eq!(selected_fill_opacity(None), serde_json::json!(0));
        let expr = selected_fill_opacity(Some("Bengaluru Urban"));
        assert_eq!(
            expr,
            serde_json::json!(["case", ["==", ["get", "district"], "Bengaluru Urban"], 0.3, 0])
        );
    }

    #[test]
    fn district_layer_ids_are_stable() {
        let ids: Vec<&str> = district_layers().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["district-fill", "district-boundaries", "district-labels"]);
    }
}
