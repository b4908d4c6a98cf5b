//! Facility markers, implemented as permanent popups pinned to each
//! facility's coordinates. Creation is destroy-before-create; click wiring
//! goes through the popup's DOM after it lands in the document.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::Callback;

use crate::map::ffi::{to_js, MapHandle, Popup};
use crate::models::Location;

const CLICK_ARM_DELAY_MS: u32 = 100;

/// Validated `(lng, lat)` for a facility, or `None` when the record cannot
/// be placed: missing fields, NaN (the API ships the string "NaN" for some
/// legacy rows), or out-of-range values.
pub fn parse_coordinates(location: &Location) -> Option<(f64, f64)> {
    let lat = location.latitude?;
    let lng = location.longitude?;
    if lat.is_nan() || lng.is_nan() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some((lng, lat))
}

/// Indices of the locations that would actually get a marker.
pub fn renderable_indices(locations: &[Location]) -> Vec<usize> {
    locations
        .iter()
        .enumerate()
        .filter(|(_, loc)| parse_coordinates(loc).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Marker body. `data-marker-index` is the hook the click handler finds the
/// element by once the popup is in the DOM.
pub fn render_html(location: &Location, index: usize, is_current: bool) -> String {
    let current_class = if is_current { " current" } else { "" };
    let status_class = if location.is_active() { "active" } else { "inactive" };
    format!(
        concat!(
            "<div class=\"marker-content{}\" data-marker-index=\"{}\">",
            "<span class=\"marker-status {}\"></span>",
            "<span class=\"marker-name\">{}</span>",
            "</div>"
        ),
        current_class,
        index,
        status_class,
        html_escape(&location.location_name),
    )
}

struct LocationMarker {
    popup: Popup,
    index: usize,
    // Kept alive for as long as the marker exists
    click_closure: Rc<RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>>>,
    pending_arm: Option<Timeout>,
}

impl LocationMarker {
    fn create(
        map: &MapHandle,
        location: &Location,
        index: usize,
        is_current: bool,
        on_select: Callback<usize>,
    ) -> Option<Self> {
        let (lng, lat) = parse_coordinates(location)?;

        let options = to_js(&json!({
            "closeButton": false,
            "closeOnClick": false,
            "closeOnMove": false,
            "anchor": "bottom",
            "className": "fixed-marker-popup",
        }))
        .ok()?;

        let popup = Popup::new(&options);
        popup.set_lng_lat(&to_js(&json!([lng, lat])).ok()?);
        popup.set_html(&render_html(location, index, is_current));
        popup.add_to(map.map());

        let mut marker = Self {
            popup,
            index,
            click_closure: Rc::new(RefCell::new(None)),
            pending_arm: None,
        };
        marker.arm_click(on_select);
        Some(marker)
    }

    /// Attach the click handler once the popup's HTML exists in the
    /// document. setHTML replaces the DOM subtree, so every re-render needs
    /// a re-arm.
    fn arm_click(&mut self, on_select: Callback<usize>) {
        let index = self.index;
        let slot = self.click_closure.clone();
        self.pending_arm = Some(Timeout::new(CLICK_ARM_DELAY_MS, move || {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            let selector = format!("[data-marker-index=\"{}\"]", index);
            let element = match document.query_selector(&selector) {
                Ok(Some(el)) => el,
                _ => {
                    log::warn!("📍 Marker element {} not found for click wiring", index);
                    return;
                }
            };

            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                on_select.emit(index);
            });
            if element
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .is_ok()
            {
                *slot.borrow_mut() = Some(closure);
            }
        }));
    }

    fn set_current(&mut self, location: &Location, is_current: bool, on_select: Callback<usize>) {
        self.popup
            .set_html(&render_html(location, self.index, is_current));
        self.arm_click(on_select);
    }
}

impl Drop for LocationMarker {
    fn drop(&mut self) {
        self.pending_arm = None;
        self.popup.remove();
    }
}

/// All markers currently on the map.
pub struct MarkerSet {
    map: MapHandle,
    markers: Vec<LocationMarker>,
}

impl MarkerSet {
    pub fn new(map: MapHandle) -> Self {
        Self {
            map,
            markers: Vec::new(),
        }
    }

    /// Replace every marker with one per placeable location. Existing
    /// markers are destroyed first.
    pub fn replace(
        &mut self,
        locations: &[Location],
        current_index: usize,
        on_select: Callback<usize>,
    ) {
        self.clear();

        for (index, location) in locations.iter().enumerate() {
            match LocationMarker::create(
                &self.map,
                location,
                index,
                index == current_index,
                on_select.clone(),
            ) {
                Some(marker) => self.markers.push(marker),
                None => log::warn!(
                    "📍 Skipping '{}': no usable coordinates",
                    location.location_name
                ),
            }
        }

        log::info!(
            "📍 Rendered {} of {} facility markers",
            self.markers.len(),
            locations.len()
        );
    }

    /// Re-render marker HTML so only `current_index` carries the current
    /// styling. Positions do not change.
    pub fn update_current(
        &mut self,
        locations: &[Location],
        current_index: usize,
        on_select: Callback<usize>,
    ) {
        for marker in &mut self.markers {
            if let Some(location) = locations.get(marker.index) {
                marker.set_current(location, marker.index == current_index, on_select.clone());
            }
        }
    }

    pub fn clear(&mut self) {
        if !self.markers.is_empty() {
            log::info!("📍 Clearing {} markers", self.markers.len());
        }
        self.markers.clear();
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(lat: serde_json::Value, lng: serde_json::Value) -> Location {
        serde_json::from_value(json!({
            "location_name": "Test Arena",
            "latitude": lat,
            "longitude": lng,
        }))
        .unwrap()
    }

    #[test]
    fn valid_coordinates_come_back_lng_first() {
        let loc = location(json!(28.6139), json!(77.209));
        assert_eq!(parse_coordinates(&loc), Some((77.209, 28.6139)));
    }

    #[test]
    fn nan_string_survives_deserialization_but_not_placement() {
        // The API ships literal "NaN" strings for some legacy rows; they
        // pass the has-coordinates filter but must never become markers.
        let loc = location(json!("NaN"), json!(77.209));
        assert!(loc.has_coordinates());
        assert_eq!(parse_coordinates(&loc), None);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(parse_coordinates(&location(json!(91.0), json!(77.0))), None);
        assert_eq!(parse_coordinates(&location(json!(28.0), json!(-181.0))), None);
        assert_eq!(parse_coordinates(&location(json!(-90.0), json!(180.0))), Some((180.0, -90.0)));
    }

    #[test]
    fn renderable_indices_skip_unplaceable_rows() {
        let locations = vec![
            location(json!(28.6), json!(77.2)),
            location(json!("NaN"), json!(77.2)),
            location(json!(null), json!(null)),
            location(json!(12.97), json!(77.59)),
        ];
        assert_eq!(renderable_indices(&locations), vec![0, 3]);
    }

    #[test]
    fn marker_html_escapes_names() {
        let loc: Location = serde_json::from_value(json!({
            "location_name": "A <b>\"bold\"</b> & Co",
            "operational_status": "Active",
        }))
        .unwrap();
        let html = render_html(&loc, 3, true);
        assert!(html.contains("A &lt;b&gt;&quot;bold&quot;&lt;/b&gt; &amp; Co"));
        assert!(html.contains("data-marker-index=\"3\""));
        assert!(html.contains("marker-content current"));
        assert!(html.contains("marker-status active"));
    }
}
