use serde_json::Value;
use yew::prelude::*;

use crate::hooks::{use_geo_data, use_map_layer};
use crate::map::layer_specs::{city_filter_expr, city_labels_filter, city_layers};
use crate::map::{CityFilter, LayerEventHandlers, MapHandle};
use crate::models::Properties;
use crate::services::geo_service::GeoResource;
use crate::utils::constants::{LAYER_CITIES_LABELS, LAYER_CITIES_POINTS, SOURCE_CITIES};

#[derive(Properties, PartialEq)]
pub struct CitiesProps {
    pub map: MapHandle,
    pub city_filter: CityFilter,
    pub selected_state: Option<String>,
    pub on_city_click: Callback<String>,
}

/// City points and labels, filtered by population-rank bucket and the
/// selected state.
#[function_component(Cities)]
pub fn cities(props: &CitiesProps) -> Html {
    let geo = use_geo_data(GeoResource::Cities);

    let handlers = {
        let on_city_click = props.on_city_click.clone();
        LayerEventHandlers {
            layer_id: LAYER_CITIES_POINTS,
            on_click: Some(Callback::from(move |properties: Properties| {
                if let Some(name) = properties.get("name").and_then(|v| v.as_str()) {
                    on_city_click.emit(name.to_string());
                }
            })),
            on_hover: None,
            on_leave: None,
        }
    };

    let binding = use_map_layer(
        props.map.clone(),
        SOURCE_CITIES,
        city_layers(),
        Some(handlers),
        geo.state.data.clone(),
    );

    {
        let binding = binding.clone();
        use_effect_with(
            (props.city_filter, props.selected_state.clone(), geo.state.loading),
            move |(city_filter, selected_state, _)| {
                let binding = binding.borrow();

                // A cleared bucket with no state means no filter at all
                let points = city_filter_expr(*city_filter, selected_state.as_deref())
                    .unwrap_or(Value::Null);
                if let Err(e) = binding.update(LAYER_CITIES_POINTS, "filter", &points) {
                    log::warn!("🏙️ City filter update failed: {}", e);
                }

                let labels = city_labels_filter(*city_filter, selected_state.as_deref());
                if let Err(e) = binding.update(LAYER_CITIES_LABELS, "filter", &labels) {
                    log::warn!("🏙️ City label filter update failed: {}", e);
                }
                || ()
            },
        );
    }

    if let Some(error) = &geo.state.error {
        log::warn!("🏙️ Cities layer degraded: {}", error);
    }

    Html::default()
}
