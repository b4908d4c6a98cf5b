use std::rc::Rc;

use yew::prelude::*;

use crate::models::FeatureCollection;
use crate::services::geo_service::{fetch_geo_data, GeoResource};

#[derive(Clone, PartialEq)]
pub struct GeoDataState {
    pub data: Option<Rc<FeatureCollection>>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseGeoDataHandle {
    pub state: UseStateHandle<GeoDataState>,
    pub refetch: Callback<()>,
}

/// Load one GeoJSON resource and keep it as component state. A stale
/// response never wins: each request takes a sequence number and only the
/// latest one may write back.
#[hook]
pub fn use_geo_data(resource: GeoResource) -> UseGeoDataHandle {
    let state = use_state(|| GeoDataState {
        data: None,
        loading: true,
        error: None,
    });
    let request_seq = use_mut_ref(|| 0u64);

    let load = {
        let state = state.clone();
        let request_seq = request_seq.clone();
        move |force_refresh: bool| {
            *request_seq.borrow_mut() += 1;
            let seq = *request_seq.borrow();

            let mut current = (*state).clone();
            current.loading = true;
            current.error = None;
            state.set(current);

            let state = state.clone();
            let request_seq = request_seq.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_geo_data(resource, force_refresh).await;
                if *request_seq.borrow() != seq {
                    log::info!("🗺️ Dropping stale response for {}", resource.path());
                    return;
                }
                match result {
                    Ok(data) => {
                        state.set(GeoDataState {
                            data: Some(data),
                            loading: false,
                            error: None,
                        });
                    }
                    Err(e) => {
                        log::error!("❌ GeoJSON load failed: {}", e);
                        // Keep any previously loaded data on screen
                        let mut current = (*state).clone();
                        current.loading = false;
                        current.error = Some(e.to_string());
                        state.set(current);
                    }
                }
            });
        }
    };

    {
        let load = load.clone();
        use_effect_with(resource, move |_| {
            load(false);
            || ()
        });
    }

    let refetch = Callback::from(move |_| load(true));

    UseGeoDataHandle { state, refetch }
}
