use serde_json::json;
use yew::prelude::*;

use crate::hooks::{use_geo_data, use_map_layer};
use crate::map::ffi::to_js;
use crate::map::layer_specs::{match_none_filter, state_layers, state_name_filter};
use crate::map::{LayerEventHandlers, MapHandle};
use crate::models::Properties;
use crate::services::geo_service::GeoResource;
use crate::utils::constants::{
    LAYER_STATE_HIGHLIGHT, LAYER_STATE_OUTLINE, PROP_STATE_NAME, SOURCE_STATES, STATE_LAYERS,
};

#[derive(Properties, PartialEq)]
pub struct StateBoundariesProps {
    pub map: MapHandle,
    pub selected_state: Option<String>,
    pub on_state_click: Callback<String>,
}

fn set_cursor(map: &MapHandle, cursor: &str) {
    let _ = map.map().get_canvas().style().set_property("cursor", cursor);
}

/// Direct filter write, for handlers that run before the binding handle is
/// in scope. Unknown layers are ignored; the style may still be settling.
fn set_layer_filter(map: &MapHandle, layer_id: &str, filter: &serde_json::Value) {
    if map.map().get_layer(layer_id).is_undefined() {
        return;
    }
    match to_js(filter) {
        Ok(js) => {
            if let Err(e) = map.map().set_filter(layer_id, &js) {
                log::warn!("🗺️ setFilter('{}') failed: {:?}", layer_id, e);
            }
        }
        Err(e) => log::warn!("🗺️ Filter conversion failed: {}", e),
    }
}

/// State polygons: the clickable surface of the country overview. Hovering
/// outlines a state, clicking reports its boundary name upward. Hover is
/// inert once a state is selected; the layer closures check a shared flag
/// because they attach once but props keep changing.
#[function_component(StateBoundaries)]
pub fn state_boundaries(props: &StateBoundariesProps) -> Html {
    let geo = use_geo_data(GeoResource::States);
    let interactive = use_mut_ref(|| props.selected_state.is_none());

    let handlers = {
        let on_state_click = props.on_state_click.clone();
        let map_for_hover = props.map.clone();
        let map_for_leave = props.map.clone();
        let hover_flag = interactive.clone();
        let leave_flag = interactive.clone();

        LayerEventHandlers {
            layer_id: LAYER_STATE_HIGHLIGHT,
            on_click: Some(Callback::from(move |properties: Properties| {
                if let Some(name) = properties.get(PROP_STATE_NAME).and_then(|v| v.as_str()) {
                    on_state_click.emit(name.to_string());
                }
            })),
            on_hover: Some(Callback::from(move |properties: Properties| {
                if !*hover_flag.borrow() {
                    return;
                }
                set_cursor(&map_for_hover, "pointer");
                if let Some(name) = properties.get(PROP_STATE_NAME).and_then(|v| v.as_str()) {
                    set_layer_filter(&map_for_hover, LAYER_STATE_OUTLINE, &state_name_filter(name));
                }
            })),
            on_leave: Some(Callback::from(move |_| {
                if !*leave_flag.borrow() {
                    return;
                }
                set_cursor(&map_for_leave, "");
                set_layer_filter(&map_for_leave, LAYER_STATE_OUTLINE, &match_none_filter());
            })),
        }
    };

    let binding = use_map_layer(
        props.map.clone(),
        SOURCE_STATES,
        state_layers(),
        Some(handlers),
        geo.state.data.clone(),
    );

    // Selection narrows every state layer to the chosen state; clearing it
    // restores the full country and re-enables hover
    {
        let binding = binding.clone();
        let interactive = interactive.clone();
        let map = props.map.clone();
        use_effect_with(
            (props.selected_state.clone(), geo.state.loading),
            move |(selected, _)| {
                *interactive.borrow_mut() = selected.is_none();

                let filter = match selected.as_deref() {
                    Some(name) => state_name_filter(name),
                    None => json!(["!=", ["get", PROP_STATE_NAME], ""]),
                };
                let binding = binding.borrow();
                for layer_id in STATE_LAYERS {
                    // The outline stays hover-driven while nothing is selected
                    if layer_id == LAYER_STATE_OUTLINE && selected.is_none() {
                        set_layer_filter(&map, layer_id, &match_none_filter());
                        continue;
                    }
                    if let Err(e) = binding.update(layer_id, "filter", &filter) {
                        log::warn!("🗺️ State filter update failed: {}", e);
                    }
                }
                || ()
            },
        );
    }

    if let Some(error) = &geo.state.error {
        log::warn!("🗺️ States layer degraded: {}", error);
    }

    Html::default()
}
