use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::{use_geo_data, use_map_layer};
use crate::map::layer_specs::{district_layers, selected_fill_opacity, DistrictVisibility};
use crate::map::{LayerBinding, LayerEventHandlers, MapHandle};
use crate::models::Properties;
use crate::services::geo_service::GeoResource;
use crate::utils::constants::{
    DISTRICT_LAYERS, LAYER_DISTRICT_FILL, PROP_DISTRICT_NAME, SOURCE_DISTRICTS,
};

#[derive(Properties, PartialEq)]
pub struct DistrictBoundariesProps {
    pub map: MapHandle,
    pub selected_state: Option<String>,
    pub selected_district: Option<Properties>,
    pub on_district_click: Callback<Properties>,
}

/// Push the three-tier visibility policy onto every district layer.
fn apply_visibility(
    binding: &Rc<RefCell<LayerBinding>>,
    selected_state: Option<&str>,
    zoom: f64,
) {
    let visibility = DistrictVisibility::for_view(
        selected_state,
        zoom,
        CONFIG.map_config.district_zoom_threshold,
    );
    let filter = visibility.filter();
    let binding = binding.borrow();
    for layer_id in DISTRICT_LAYERS {
        if let Err(e) = binding.update(layer_id, "filter", &filter) {
            log::warn!("🗺️ District filter update failed: {}", e);
        }
        if let Err(e) = binding.set_visibility(layer_id, visibility.is_visible()) {
            log::warn!("🗺️ District visibility update failed: {}", e);
        }
    }
}

/// District polygons. Hidden at the country overview, revealed either by
/// selecting a state or by zooming past the threshold; re-evaluated on every
/// zoom frame so they appear mid-gesture.
#[function_component(DistrictBoundaries)]
pub fn district_boundaries(props: &DistrictBoundariesProps) -> Html {
    let geo = use_geo_data(GeoResource::Districts);

    let handlers = LayerEventHandlers {
        layer_id: LAYER_DISTRICT_FILL,
        on_click: Some(props.on_district_click.clone()),
        on_hover: None,
        on_leave: None,
    };

    let binding = use_map_layer(
        props.map.clone(),
        SOURCE_DISTRICTS,
        district_layers(),
        Some(handlers),
        geo.state.data.clone(),
    );

    // Apply the policy now and on every zoom change while this selection
    // holds. Data arrival also lands here via the loading flag.
    {
        let binding = binding.clone();
        let map = props.map.clone();
        use_effect_with(
            (props.selected_state.clone(), geo.state.loading),
            move |(selected_state, _)| {
                apply_visibility(&binding, selected_state.as_deref(), map.map().get_zoom());

                let listener = {
                    let binding = binding.clone();
                    let map = map.clone();
                    let selected_state = selected_state.clone();
                    Closure::<dyn FnMut()>::new(move || {
                        apply_visibility(&binding, selected_state.as_deref(), map.map().get_zoom());
                    })
                };
                map.map().on("zoom", listener.as_ref().unchecked_ref());

                move || {
                    map.map().off("zoom", listener.as_ref().unchecked_ref());
                }
            },
        );
    }

    // Light up the selected district
    {
        let binding = binding.clone();
        use_effect_with(props.selected_district.clone(), move |selected| {
            let name = selected
                .as_ref()
                .and_then(|p| p.get(PROP_DISTRICT_NAME))
                .and_then(|v| v.as_str());
            let opacity = selected_fill_opacity(name);
            if let Err(e) = binding
                .borrow()
                .update(LAYER_DISTRICT_FILL, "paint.fill-opacity", &opacity)
            {
                log::warn!("🗺️ District highlight update failed: {}", e);
            }
            || ()
        });
    }

    if let Some(error) = &geo.state.error {
        log::warn!("🗺️ Districts layer degraded: {}", error);
    }

    Html::default()
}
