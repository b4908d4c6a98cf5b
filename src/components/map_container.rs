use serde_json::json;
use yew::prelude::*;

use crate::components::game_ui::GameUi;
use crate::components::layers::{Cities, DistrictBoundaries, StateBoundaries};
use crate::components::location_modal::LocationModal;
use crate::config::CONFIG;
use crate::hooks::{use_keyboard_navigation, use_map_controls};
use crate::map::ffi::{self, set_access_token, to_js, MapHandle, NavigationControl};
use crate::models::{Location, User};
use crate::services::geo_service::available_states_from_data;
use crate::services::ApiClient;

const MAP_CONTAINER_ID: &str = "claygrounds-map";

#[derive(Properties, PartialEq)]
pub struct MapContainerProps {
    pub user: User,
    pub on_logout: Callback<()>,
}

#[derive(Clone, PartialEq)]
struct LocationsState {
    items: Vec<Location>,
    loading: bool,
    error: Option<String>,
}

#[function_component(MapContainer)]
pub fn map_container(props: &MapContainerProps) -> Html {
    let map = use_state(|| None::<MapHandle>);
    let locations = use_state(|| LocationsState {
        items: Vec::new(),
        loading: true,
        error: None,
    });

    // Facility data from the partner API
    {
        let locations = locations.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let client = ApiClient::new();
                match client.get_locations_with_coordinates().await {
                    Ok(items) => {
                        locations.set(LocationsState {
                            items,
                            loading: false,
                            error: None,
                        });
                    }
                    Err(e) => {
                        log::error!("❌ Facility fetch failed: {}", e);
                        locations.set(LocationsState {
                            items: Vec::new(),
                            loading: false,
                            error: Some(e.to_string()),
                        });
                    }
                }
            });
            || ()
        });
    }

    // Map lifecycle: create once the container div exists, remove on unmount
    {
        let map = map.clone();
        use_effect_with((), move |_| {
            let created = if CONFIG.has_mapbox_token() {
                match create_map() {
                    Ok(handle) => {
                        map.set(Some(handle.clone()));
                        Some(handle)
                    }
                    Err(e) => {
                        log::error!("❌ Map initialization failed: {}", e);
                        None
                    }
                }
            } else {
                log::warn!("⚠️ MAPBOX_ACCESS_TOKEN not set, map disabled");
                None
            };

            move || {
                if let Some(handle) = created {
                    handle.map().remove();
                }
            }
        });
    }

    let controls = use_map_controls((*map).clone(), locations.items.clone());

    let show_help = use_state(|| false);
    let toggle_help = {
        let show_help = show_help.clone();
        Callback::from(move |_| show_help.set(!*show_help))
    };
    use_keyboard_navigation(controls.clone(), (*map).clone(), toggle_help.clone());

    let current_location = controls.current_location();
    let selected_state = controls.selected_state();

    html! {
        <div class="map-screen">
            <div id={MAP_CONTAINER_ID} class="map-container" />

            if let Some(map) = (*map).clone() {
                <StateBoundaries
                    map={map.clone()}
                    selected_state={selected_state.clone()}
                    on_state_click={controls.select_state.clone()}
                />
                <DistrictBoundaries
                    map={map.clone()}
                    selected_state={selected_state.clone()}
                    selected_district={controls.selected_district()}
                    on_district_click={controls.select_district.clone()}
                />
                <Cities
                    map={map}
                    city_filter={controls.city_filter()}
                    selected_state={selected_state.clone()}
                    on_city_click={controls.select_city.clone()}
                />
            } else {
                <div class="map-placeholder">
                    <h2>{"🗺️ Map unavailable"}</h2>
                    <p>{"Set MAPBOX_ACCESS_TOKEN and rebuild to enable the map."}</p>
                </div>
            }

            <GameUi
                user={props.user.clone()}
                mode={controls.mode()}
                selected_state={selected_state}
                available_states={available_states_from_data()}
                current_location={current_location.clone()}
                current_index={controls.current_location_index()}
                location_count={controls.state_location_count()}
                has_next={controls.has_next_location()}
                has_previous={controls.has_previous_location()}
                is_animating={controls.is_animating()}
                city_filter={controls.city_filter()}
                locations_loading={locations.loading}
                locations_error={locations.error.clone()}
                on_select_state={controls.select_state.clone()}
                on_next={controls.next_location.clone()}
                on_previous={controls.previous_location.clone()}
                on_open_details={controls.open_modal.clone()}
                on_back={controls.back_to_selection.clone()}
                on_city_filter={controls.set_city_filter.clone()}
                on_toggle_analytics={controls.toggle_analytics.clone()}
                on_logout={props.on_logout.clone()}
            />

            if controls.modal_open() {
                if let Some(location) = current_location {
                    <LocationModal
                        location={location}
                        on_close={controls.close_modal.clone()}
                    />
                }
            }

            if *show_help {
                { help_overlay(toggle_help) }
            }
        </div>
    }
}

fn help_overlay(on_close: Callback<()>) -> Html {
    const SHORTCUTS: [(&str, &str); 10] = [
        ("Esc", "Close modal / back out"),
        ("← → / A D", "Step between facilities"),
        ("Enter / Space", "Facility details"),
        ("F", "Fly to current facility"),
        ("1–4", "City filter: all / top 10 / top 50 / metros"),
        ("+ / -", "Zoom"),
        ("R", "Reset to country view"),
        ("Ctrl+B", "Business overview"),
        ("Ctrl+Shift+B", "Clear district & city selection"),
        ("H / ?", "This help"),
    ];

    html! {
        <div class="modal-backdrop" onclick={on_close.reform(|_| ())}>
            <div class="modal-card help-card">
                <h2>{"⌨️ Keyboard shortcuts"}</h2>
                <table class="help-table">
                    { for SHORTCUTS.iter().map(|(keys, what)| html! {
                        <tr key={*keys}>
                            <td class="help-keys">{*keys}</td>
                            <td>{*what}</td>
                        </tr>
                    }) }
                </table>
            </div>
        </div>
    }
}

fn create_map() -> Result<MapHandle, crate::error::AppError> {
    set_access_token(CONFIG.mapbox_token())?;

    let options = to_js(&json!({
        "container": MAP_CONTAINER_ID,
        "style": CONFIG.map_config.style_url,
        "center": [
            CONFIG.map_config.default_center_lng,
            CONFIG.map_config.default_center_lat,
        ],
        "zoom": CONFIG.map_config.default_zoom,
    }))?;

    let map = ffi::Map::new(&options);
    let nav_control = NavigationControl::new();
    map.add_control(nav_control.as_ref());

    log::info!("🗺️ Map initialized over India");
    Ok(MapHandle::new(map))
}
