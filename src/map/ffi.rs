//! Foreign function interface to Mapbox GL JS. Thin wrappers only; no state,
//! no policy. Mutating calls that Mapbox may throw from are declared `catch`
//! so failures stay per-call instead of aborting the WASM module.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::AppError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new(options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = isStyleLoaded)]
    pub fn is_style_loaded(this: &Map) -> bool;

    #[wasm_bindgen(method, catch, js_name = addSource)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getSource)]
    pub fn get_source(this: &Map, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = removeSource)]
    pub fn remove_source(this: &Map, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addLayer)]
    pub fn add_layer(this: &Map, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getLayer)]
    pub fn get_layer(this: &Map, id: &str) -> JsValue;

    #[wasm_bindgen(method, catch, js_name = removeLayer)]
    pub fn remove_layer(this: &Map, id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setFilter)]
    pub fn set_filter(this: &Map, layer_id: &str, filter: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPaintProperty)]
    pub fn set_paint_property(
        this: &Map,
        layer_id: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setLayoutProperty)]
    pub fn set_layout_property(
        this: &Map,
        layer_id: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &Map) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &Map, event: &str, layer_id: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &Map, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = off)]
    pub fn off_layer(this: &Map, event: &str, layer_id: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = easeTo)]
    pub fn ease_to(this: &Map, options: &JsValue);

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, options: &JsValue);

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_name = addControl)]
    pub fn add_control(this: &Map, control: &JsValue);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);
}

#[wasm_bindgen]
extern "C" {
    /// A GeoJSON source handle, obtained by casting `Map::get_source`.
    pub type GeoJsonSource;

    #[wasm_bindgen(method, js_name = setData)]
    pub fn set_data(this: &GeoJsonSource, data: &JsValue);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new(options: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Popup, lng_lat: &JsValue);

    #[wasm_bindgen(method, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str);

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Popup, map: &Map);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Popup);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl)]
    pub type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl)]
    pub fn new() -> NavigationControl;
}

#[wasm_bindgen]
extern "C" {
    /// A Mapbox layer mouse event; only the feature list is read.
    pub type MapMouseEvent;

    #[wasm_bindgen(method, getter)]
    pub fn features(this: &MapMouseEvent) -> JsValue;
}

/// Set `mapboxgl.accessToken` on the global namespace object.
pub fn set_access_token(token: &str) -> Result<(), AppError> {
    let global = js_sys::global();
    let mapboxgl = js_sys::Reflect::get(&global, &JsValue::from_str("mapboxgl"))
        .map_err(|_| AppError::LayerBinding("mapboxgl is not loaded".to_string()))?;
    if mapboxgl.is_undefined() {
        return Err(AppError::LayerBinding("mapboxgl is not loaded".to_string()));
    }
    js_sys::Reflect::set(
        &mapboxgl,
        &JsValue::from_str("accessToken"),
        &JsValue::from_str(token),
    )
    .map_err(|_| AppError::LayerBinding("could not set mapboxgl.accessToken".to_string()))?;
    Ok(())
}

/// Serialize JSON into plain JS objects (not ES maps) for Mapbox options,
/// filters, and paint values.
pub fn to_js(value: &serde_json::Value) -> Result<JsValue, AppError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| AppError::LayerBinding(format!("JS conversion failed: {}", e)))
}

/// Shared map handle for props and hooks. Compared by identity: two handles
/// are equal when they wrap the same underlying map.
#[derive(Clone)]
pub struct MapHandle(Rc<Map>);

impl MapHandle {
    pub fn new(map: Map) -> Self {
        Self(Rc::new(map))
    }

    pub fn map(&self) -> &Map {
        &self.0
    }
}

impl PartialEq for MapHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
