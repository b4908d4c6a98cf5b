use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::map::{LayerBinding, LayerEventHandlers, LayerSpec, MapHandle};
use crate::models::FeatureCollection;

/// Own one layer binding for the lifetime of the component. Fresh data
/// rebinds the source; unmount tears the layers down. The binding is tied
/// to the map it was created with, so callers remount when the map changes.
#[hook]
pub fn use_map_layer(
    map: MapHandle,
    source_id: &'static str,
    specs: Vec<LayerSpec>,
    handlers: Option<LayerEventHandlers>,
    data: Option<Rc<FeatureCollection>>,
) -> Rc<RefCell<LayerBinding>> {
    let binding = use_state(move || LayerBinding::new(map, source_id, specs, handlers));

    {
        let binding = (*binding).clone();
        use_effect_with(data, move |data| {
            if let Some(data) = data.clone() {
                LayerBinding::bind(&binding, data);
            }
            || ()
        });
    }

    {
        let binding = (*binding).clone();
        use_effect_with((), move |_| {
            move || binding.borrow_mut().teardown()
        });
    }

    (*binding).clone()
}
