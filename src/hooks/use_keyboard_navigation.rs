use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::hooks::use_map_controls::UseMapControlsHandle;
use crate::map::ffi::to_js;
use crate::map::{CityFilter, MapHandle, ViewMode};

const ZOOM_STEP: f64 = 1.0;
const ZOOM_DURATION_MS: u32 = 300;

/// What a key press should do, resolved against the current view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Escape,
    NextLocation,
    PreviousLocation,
    OpenModal,
    BackToSelection,
    ToggleAnalytics,
    ClearSelections,
    SetCityFilter(CityFilter),
    ZoomIn,
    ZoomOut,
    ResetView,
    FlyToCurrent,
    ToggleHelp,
}

/// Map a key press to an action. Form fields swallow everything except
/// Escape; facility stepping only exists inside a state.
pub fn action_for(
    key: &str,
    ctrl_or_meta: bool,
    shift: bool,
    in_input: bool,
    mode: ViewMode,
) -> Option<KeyAction> {
    if in_input {
        return (key == "Escape").then_some(KeyAction::Escape);
    }

    if ctrl_or_meta {
        return match key {
            "b" | "B" if shift => Some(KeyAction::ClearSelections),
            "b" | "B" => Some(KeyAction::ToggleAnalytics),
            _ => None,
        };
    }

    let navigating = mode == ViewMode::LocationNavigation;
    match key {
        "Escape" => Some(KeyAction::Escape),
        "ArrowRight" | "d" | "D" if navigating => Some(KeyAction::NextLocation),
        "ArrowLeft" | "a" | "A" if navigating => Some(KeyAction::PreviousLocation),
        "Enter" | " " if navigating => Some(KeyAction::OpenModal),
        "f" | "F" if navigating => Some(KeyAction::FlyToCurrent),
        "Backspace" if navigating || mode == ViewMode::StateFocused => {
            Some(KeyAction::BackToSelection)
        }
        "1" => Some(KeyAction::SetCityFilter(CityFilter::All)),
        "2" => Some(KeyAction::SetCityFilter(CityFilter::Top10)),
        "3" => Some(KeyAction::SetCityFilter(CityFilter::Top50)),
        "4" => Some(KeyAction::SetCityFilter(CityFilter::Metros)),
        "+" | "=" | "ArrowUp" => Some(KeyAction::ZoomIn),
        "-" | "ArrowDown" => Some(KeyAction::ZoomOut),
        "r" | "R" => Some(KeyAction::ResetView),
        "h" | "H" | "?" => Some(KeyAction::ToggleHelp),
        _ => None,
    }
}

fn is_form_target(event: &web_sys::KeyboardEvent) -> bool {
    let element = match event.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
        Some(el) => el,
        None => return false,
    };
    matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
        || element.is_content_editable()
}

fn zoom_by(map: &MapHandle, delta: f64) {
    let zoom = map.map().get_zoom() + delta;
    if let Ok(options) = to_js(&json!({ "zoom": zoom, "duration": ZOOM_DURATION_MS })) {
        map.map().ease_to(&options);
    }
}

/// Document-level keyboard controls for the whole game. Reattached when the
/// map appears so zoom and camera actions see the live handle.
#[hook]
pub fn use_keyboard_navigation(
    controls: UseMapControlsHandle,
    map: Option<MapHandle>,
    on_toggle_help: Callback<()>,
) {
    use_effect_with(map, move |map| {
        let map = map.clone();
        let listener = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| {
                let action = action_for(
                    &event.key(),
                    event.ctrl_key() || event.meta_key(),
                    event.shift_key(),
                    is_form_target(&event),
                    controls.mode(),
                );

                let action = match action {
                    Some(a) => a,
                    None => return,
                };
                event.prevent_default();

                match action {
                    KeyAction::Escape => controls.escape.emit(()),
                    KeyAction::NextLocation => controls.next_location.emit(()),
                    KeyAction::PreviousLocation => controls.previous_location.emit(()),
                    KeyAction::OpenModal => controls.open_modal.emit(()),
                    KeyAction::BackToSelection | KeyAction::ResetView => {
                        controls.back_to_selection.emit(())
                    }
                    KeyAction::ToggleAnalytics => controls.toggle_analytics.emit(()),
                    KeyAction::ClearSelections => controls.clear_selections.emit(()),
                    KeyAction::SetCityFilter(filter) => controls.set_city_filter.emit(filter),
                    KeyAction::FlyToCurrent => {
                        controls.select_location.emit(controls.current_location_index())
                    }
                    KeyAction::ToggleHelp => on_toggle_help.emit(()),
                    KeyAction::ZoomIn => {
                        if let Some(map) = &map {
                            zoom_by(map, ZOOM_STEP);
                        }
                    }
                    KeyAction::ZoomOut => {
                        if let Some(map) = &map {
                            zoom_by(map, -ZOOM_STEP);
                        }
                    }
                }
            },
        );

        let document = web_sys::window().and_then(|w| w.document());
        if let Some(document) = &document {
            if document
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                .is_err()
            {
                log::warn!("⌨️ Could not attach keyboard listener");
            }
        }

        move || {
            if let Some(document) = document {
                let _ = document
                    .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_only_pass_escape_through() {
        assert_eq!(
            action_for("Escape", false, false, true, ViewMode::LocationNavigation),
            Some(KeyAction::Escape)
        );
        assert_eq!(action_for("d", false, false, true, ViewMode::LocationNavigation), None);
        assert_eq!(action_for("1", false, false, true, ViewMode::StateSelection), None);
    }

    #[test]
    fn facility_stepping_needs_location_navigation() {
        assert_eq!(
            action_for("ArrowRight", false, false, false, ViewMode::LocationNavigation),
            Some(KeyAction::NextLocation)
        );
        assert_eq!(
            action_for("ArrowRight", false, false, false, ViewMode::StateSelection),
            None
        );
        assert_eq!(
            action_for("a", false, false, false, ViewMode::LocationNavigation),
            Some(KeyAction::PreviousLocation)
        );
        assert_eq!(action_for("a", false, false, false, ViewMode::StateFocused), None);
    }

    #[test]
    fn number_keys_pick_city_filters() {
        assert_eq!(
            action_for("2", false, false, false, ViewMode::StateSelection),
            Some(KeyAction::SetCityFilter(CityFilter::Top10))
        );
        assert_eq!(
            action_for("4", false, false, false, ViewMode::LocationNavigation),
            Some(KeyAction::SetCityFilter(CityFilter::Metros))
        );
    }

    #[test]
    fn analytics_toggle_needs_the_modifier() {
        assert_eq!(
            action_for("b", true, false, false, ViewMode::StateSelection),
            Some(KeyAction::ToggleAnalytics)
        );
        assert_eq!(
            action_for("b", true, true, false, ViewMode::StateSelection),
            Some(KeyAction::ClearSelections)
        );
        assert_eq!(action_for("b", false, false, false, ViewMode::StateSelection), None);
    }

    #[test]
    fn zoom_reset_and_help_keys() {
        assert_eq!(
            action_for("=", false, false, false, ViewMode::StateSelection),
            Some(KeyAction::ZoomIn)
        );
        assert_eq!(
            action_for("ArrowDown", false, false, false, ViewMode::StateSelection),
            Some(KeyAction::ZoomOut)
        );
        assert_eq!(
            action_for("r", false, false, false, ViewMode::LocationNavigation),
            Some(KeyAction::ResetView)
        );
        assert_eq!(
            action_for("?", false, false, false, ViewMode::StateSelection),
            Some(KeyAction::ToggleHelp)
        );
    }

    #[test]
    fn fly_to_current_only_inside_a_state() {
        assert_eq!(
            action_for("f", false, false, false, ViewMode::LocationNavigation),
            Some(KeyAction::FlyToCurrent)
        );
        assert_eq!(action_for("f", false, false, false, ViewMode::StateSelection), None);
    }
}
