//! Binding between one GeoJSON source (plus its style layers) and a live
//! map. Handles the style-not-loaded race with a short retry, keeps attach
//! idempotent, and tears everything down in reverse order on drop.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::Callback;

use crate::error::AppError;
use crate::map::ffi::{to_js, GeoJsonSource, MapHandle, MapMouseEvent};
use crate::map::layer_specs::LayerSpec;
use crate::models::{FeatureCollection, Properties};

const STYLE_POLL_MS: u32 = 100;

/// Optional mouse handlers attached to one interactive layer of the group.
#[derive(Clone, Default)]
pub struct LayerEventHandlers {
    pub layer_id: &'static str,
    pub on_click: Option<Callback<Properties>>,
    pub on_hover: Option<Callback<Properties>>,
    pub on_leave: Option<Callback<()>>,
}

/// Which part of a layer a dynamic update targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath<'a> {
    Filter,
    Paint(&'a str),
    Layout(&'a str),
}

impl<'a> PropertyPath<'a> {
    /// `"filter"`, `"paint.<name>"` or `"layout.<name>"`.
    pub fn parse(path: &'a str) -> Option<Self> {
        if path == "filter" {
            return Some(PropertyPath::Filter);
        }
        if let Some(name) = path.strip_prefix("paint.") {
            if !name.is_empty() {
                return Some(PropertyPath::Paint(name));
            }
        }
        if let Some(name) = path.strip_prefix("layout.") {
            if !name.is_empty() {
                return Some(PropertyPath::Layout(name));
            }
        }
        None
    }
}

pub struct LayerBinding {
    map: MapHandle,
    source_id: &'static str,
    specs: Vec<LayerSpec>,
    handlers: Option<LayerEventHandlers>,
    data: Option<Rc<FeatureCollection>>,
    bound: bool,
    // Bumped on teardown so in-flight retry callbacks become no-ops
    generation: Cell<u64>,
    pending_poll: Option<Timeout>,
    listeners: Vec<(&'static str, &'static str, Closure<dyn FnMut(MapMouseEvent)>)>,
}

impl LayerBinding {
    pub fn new(
        map: MapHandle,
        source_id: &'static str,
        specs: Vec<LayerSpec>,
        handlers: Option<LayerEventHandlers>,
    ) -> Rc<std::cell::RefCell<Self>> {
        Rc::new(std::cell::RefCell::new(Self {
            map,
            source_id,
            specs,
            handlers,
            data: None,
            bound: false,
            generation: Cell::new(0),
            pending_poll: None,
            listeners: Vec::new(),
        }))
    }

    /// Store the data and attach as soon as the style allows it. Safe to call
    /// again with fresh data; an already-bound source just gets `setData`.
    pub fn bind(this: &Rc<std::cell::RefCell<Self>>, data: Rc<FeatureCollection>) {
        this.borrow_mut().data = Some(data);
        Self::try_attach(this);
    }

    fn try_attach(this: &Rc<std::cell::RefCell<Self>>) {
        let ready = this.borrow().map.map().is_style_loaded();
        if !ready {
            Self::schedule_retry(this);
            return;
        }
        let result = this.borrow_mut().attach();
        if let Err(e) = result {
            log::error!("🗺️ Layer binding failed for '{}': {}", this.borrow().source_id, e);
        }
    }

    fn schedule_retry(this: &Rc<std::cell::RefCell<Self>>) {
        let weak = Rc::downgrade(this);
        let generation = this.borrow().generation.get();
        let timeout = Timeout::new(STYLE_POLL_MS, move || {
            if let Some(binding) = weak.upgrade() {
                if binding.borrow().generation.get() == generation {
                    LayerBinding::try_attach(&binding);
                }
            }
        });
        this.borrow_mut().pending_poll = Some(timeout);
    }

    fn attach(&mut self) -> Result<(), AppError> {
        let data = self
            .data
            .clone()
            .ok_or_else(|| AppError::LayerBinding("No data bound".to_string()))?;
        let data_json = serde_json::to_value(&*data)
            .map_err(|e| AppError::LayerBinding(format!("GeoJSON serialization failed: {}", e)))?;

        let map = self.map.clone();
        let source = map.map().get_source(self.source_id);
        if source.is_undefined() {
            let source_def = to_js(&json!({ "type": "geojson", "data": data_json }))?;
            map.map()
                .add_source(self.source_id, &source_def)
                .map_err(|e| {
                    AppError::LayerBinding(format!(
                        "addSource('{}') failed: {:?}",
                        self.source_id, e
                    ))
                })?;
        } else {
            source
                .unchecked_into::<GeoJsonSource>()
                .set_data(&to_js(&data_json)?);
        }

        for spec in &self.specs {
            // Re-adding keeps exactly one instance per id even when a bind
            // races a style reload
            if !map.map().get_layer(spec.id).is_undefined() {
                if let Err(e) = map.map().remove_layer(spec.id) {
                    log::warn!("🗺️ removeLayer('{}') before re-add failed: {:?}", spec.id, e);
                }
            }
            let layer = to_js(&spec.to_json(self.source_id))?;
            if let Err(e) = map.map().add_layer(&layer) {
                log::error!("🗺️ addLayer('{}') failed: {:?}", spec.id, e);
            }
        }

        if !self.bound {
            self.attach_listeners();
            log::info!(
                "🗺️ Source '{}' bound with {} layers",
                self.source_id,
                self.specs.len()
            );
        }
        self.bound = true;
        self.pending_poll = None;
        Ok(())
    }

    fn attach_listeners(&mut self) {
        let handlers = match &self.handlers {
            Some(h) if !h.layer_id.is_empty() => h.clone(),
            _ => return,
        };

        if let Some(cb) = handlers.on_click {
            self.listen(handlers.layer_id, "click", move |e| {
                if let Some(props) = first_feature_properties(&e) {
                    cb.emit(props);
                }
            });
        }
        if let Some(cb) = handlers.on_hover {
            self.listen(handlers.layer_id, "mousemove", move |e| {
                if let Some(props) = first_feature_properties(&e) {
                    cb.emit(props);
                }
            });
        }
        if let Some(cb) = handlers.on_leave {
            self.listen(handlers.layer_id, "mouseleave", move |_| cb.emit(()));
        }
    }

    fn listen<F>(&mut self, layer_id: &'static str, event: &'static str, handler: F)
    where
        F: FnMut(MapMouseEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(MapMouseEvent)>::new(handler);
        self.map
            .map()
            .on_layer(event, layer_id, closure.as_ref().unchecked_ref());
        self.listeners.push((layer_id, event, closure));
    }

    /// Push a filter, paint, or layout change to a bound layer. Targeting a
    /// layer the map does not know is logged and ignored; the binding stays
    /// usable.
    pub fn update(&self, layer_id: &str, path: &str, value: &Value) -> Result<(), AppError> {
        if self.map.map().get_layer(layer_id).is_undefined() {
            log::warn!("🗺️ Skipping update for unknown layer '{}'", layer_id);
            return Ok(());
        }

        let js = to_js(value)?;
        let result = match PropertyPath::parse(path) {
            Some(PropertyPath::Filter) => self.map.map().set_filter(layer_id, &js),
            Some(PropertyPath::Paint(name)) => {
                self.map.map().set_paint_property(layer_id, name, &js)
            }
            Some(PropertyPath::Layout(name)) => {
                self.map.map().set_layout_property(layer_id, name, &js)
            }
            None => {
                return Err(AppError::LayerBinding(format!(
                    "Unknown property path '{}'",
                    path
                )))
            }
        };

        result.map_err(|e| {
            AppError::LayerBinding(format!("'{}' update failed on '{}': {:?}", path, layer_id, e))
        })
    }

    /// Toggle layer visibility through the layout API.
    pub fn set_visibility(&self, layer_id: &str, visible: bool) -> Result<(), AppError> {
        let value = if visible { "visible" } else { "none" };
        self.update(layer_id, "layout.visibility", &json!(value))
    }

    /// Remove listeners, layers (reverse add order), and the source.
    /// Idempotent; also invalidates any scheduled attach retry.
    pub fn teardown(&mut self) {
        self.generation.set(self.generation.get() + 1);
        self.pending_poll = None;

        for (layer_id, event, closure) in self.listeners.drain(..) {
            self.map
                .map()
                .off_layer(event, layer_id, closure.as_ref().unchecked_ref());
        }

        for spec in self.specs.iter().rev() {
            if !self.map.map().get_layer(spec.id).is_undefined() {
                if let Err(e) = self.map.map().remove_layer(spec.id) {
                    log::warn!("🗺️ removeLayer('{}') failed: {:?}", spec.id, e);
                }
            }
        }

        if !self.map.map().get_source(self.source_id).is_undefined() {
            if let Err(e) = self.map.map().remove_source(self.source_id) {
                log::warn!("🗺️ removeSource('{}') failed: {:?}", self.source_id, e);
            }
        }

        if self.bound {
            log::info!("🗺️ Source '{}' unbound", self.source_id);
        }
        self.bound = false;
    }
}

impl Drop for LayerBinding {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn first_feature_properties(event: &MapMouseEvent) -> Option<Properties> {
    let features = event.features();
    if features.is_undefined() || features.is_null() {
        return None;
    }
    let first = features.unchecked_into::<js_sys::Array>().get(0);
    if first.is_undefined() {
        return None;
    }
    let props = js_sys::Reflect::get(&first, &JsValue::from_str("properties")).ok()?;
    serde_wasm_bindgen::from_value(props).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_path() {
        assert_eq!(PropertyPath::parse("filter"), Some(PropertyPath::Filter));
    }

    #[test]
    fn parses_paint_and_layout_paths() {
        assert_eq!(
            PropertyPath::parse("paint.fill-opacity"),
            Some(PropertyPath::Paint("fill-opacity"))
        );
        assert_eq!(
            PropertyPath::parse("layout.visibility"),
            Some(PropertyPath::Layout("visibility"))
        );
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(PropertyPath::parse(""), None);
        assert_eq!(PropertyPath::parse("paint."), None);
        assert_eq!(PropertyPath::parse("layout."), None);
        assert_eq!(PropertyPath::parse("minzoom"), None);
        assert_eq!(PropertyPath::parse("Filter"), None);
    }
}
