use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde_json::json;
use yew::prelude::*;

use crate::map::ffi::to_js;
use crate::map::{CityFilter, Effect, MapHandle, MarkerSet, NavigationState, ViewMode};
use crate::models::{Location, Properties};

/// Shared pieces every effect run needs. Cloned freely into timers and
/// marker callbacks.
#[derive(Clone)]
struct EffectContext {
    nav: Rc<RefCell<NavigationState>>,
    map: Option<MapHandle>,
    markers: Rc<RefCell<Option<MarkerSet>>>,
    version: UseStateHandle<u64>,
}

impl EffectContext {
    fn redraw(&self) {
        self.version.set(*self.version + 1);
    }

    /// Mutate the machine, run the effects it emitted, re-render.
    fn dispatch(&self, transition: impl FnOnce(&mut NavigationState) -> Vec<Effect>) {
        let effects = transition(&mut self.nav.borrow_mut());
        run_effects(effects, self);
        self.redraw();
    }
}

/// Apply a transition's effects against the live map. `ScheduleSettle`
/// re-enters through the machine's `settle` once the delay elapses; the
/// epoch check there drops any settle the user has already navigated past.
fn run_effects(effects: Vec<Effect>, ctx: &EffectContext) {
    for effect in effects {
        match effect {
            Effect::FitBounds { sw, ne, padding, duration_ms } => {
                if let Some(map) = &ctx.map {
                    let bounds = to_js(&json!([[sw.0, sw.1], [ne.0, ne.1]]));
                    let options = to_js(&json!({ "padding": padding, "duration": duration_ms }));
                    if let (Ok(bounds), Ok(options)) = (bounds, options) {
                        map.map().fit_bounds(&bounds, &options);
                    }
                }
            }
            Effect::EaseTo { center, zoom, duration_ms } => {
                if let Some(map) = &ctx.map {
                    if let Ok(options) = to_js(&json!({
                        "center": [center.0, center.1],
                        "zoom": zoom,
                        "duration": duration_ms,
                    })) {
                        map.map().ease_to(&options);
                    }
                }
            }
            Effect::FlyTo { center, zoom, duration_ms } => {
                if let Some(map) = &ctx.map {
                    if let Ok(options) = to_js(&json!({
                        "center": [center.0, center.1],
                        "zoom": zoom,
                        "duration": duration_ms,
                        "essential": true,
                    })) {
                        map.map().fly_to(&options);
                    }
                }
            }
            Effect::ReplaceMarkers => {
                let map = match &ctx.map {
                    Some(m) => m.clone(),
                    None => continue,
                };
                let on_select = select_location_callback(ctx);
                let (locations, current) = {
                    let nav = ctx.nav.borrow();
                    (nav.state_locations.clone(), nav.current_location_index)
                };
                let mut markers = ctx.markers.borrow_mut();
                let set = markers.get_or_insert_with(|| MarkerSet::new(map));
                set.replace(&locations, current, on_select);
            }
            Effect::UpdateMarkerCurrent => {
                let on_select = select_location_callback(ctx);
                let (locations, current) = {
                    let nav = ctx.nav.borrow();
                    (nav.state_locations.clone(), nav.current_location_index)
                };
                if let Some(set) = ctx.markers.borrow_mut().as_mut() {
                    set.update_current(&locations, current, on_select);
                }
            }
            Effect::ClearMarkers => {
                if let Some(set) = ctx.markers.borrow_mut().as_mut() {
                    set.clear();
                }
            }
            Effect::ScheduleSettle { epoch, delay_ms, kind } => {
                let ctx = ctx.clone();
                Timeout::new(delay_ms, move || {
                    ctx.dispatch(|nav| nav.settle(epoch, kind));
                })
                .forget();
            }
        }
    }
}

fn select_location_callback(ctx: &EffectContext) -> Callback<usize> {
    let ctx = ctx.clone();
    Callback::from(move |index: usize| {
        ctx.dispatch(|nav| nav.select_location(index));
    })
}

#[derive(Clone)]
pub struct UseMapControlsHandle {
    nav: Rc<RefCell<NavigationState>>,
    _version: UseStateHandle<u64>,
    pub select_state: Callback<String>,
    pub select_location: Callback<usize>,
    pub next_location: Callback<()>,
    pub previous_location: Callback<()>,
    pub back_to_selection: Callback<()>,
    pub open_modal: Callback<()>,
    pub close_modal: Callback<()>,
    pub set_city_filter: Callback<CityFilter>,
    pub select_district: Callback<Properties>,
    pub select_city: Callback<String>,
    pub clear_selections: Callback<()>,
    pub toggle_analytics: Callback<()>,
    pub escape: Callback<()>,
}

impl UseMapControlsHandle {
    /// Read from the machine without cloning the whole thing.
    pub fn with<R>(&self, f: impl FnOnce(&NavigationState) -> R) -> R {
        f(&self.nav.borrow())
    }

    pub fn mode(&self) -> ViewMode {
        self.with(|nav| nav.mode)
    }

    pub fn selected_state(&self) -> Option<String> {
        self.with(|nav| nav.selected_state.clone())
    }

    pub fn selected_district(&self) -> Option<Properties> {
        self.with(|nav| nav.selected_district.clone())
    }

    pub fn city_filter(&self) -> CityFilter {
        self.with(|nav| nav.city_filter)
    }

    pub fn current_location(&self) -> Option<Location> {
        self.with(|nav| nav.current_location().cloned())
    }

    pub fn current_location_index(&self) -> usize {
        self.with(|nav| nav.current_location_index)
    }

    pub fn state_location_count(&self) -> usize {
        self.with(|nav| nav.state_locations.len())
    }

    pub fn has_next_location(&self) -> bool {
        self.with(|nav| nav.has_next_location())
    }

    pub fn has_previous_location(&self) -> bool {
        self.with(|nav| nav.has_previous_location())
    }

    pub fn is_animating(&self) -> bool {
        self.with(|nav| nav.is_animating)
    }

    pub fn modal_open(&self) -> bool {
        self.with(|nav| nav.modal_open)
    }
}

/// Drive the navigation machine against a live map. State lives in a
/// `RefCell` so settle timers and marker clicks mutate the same machine the
/// callbacks do; the version counter is what makes Yew re-render after any
/// of them fire.
#[hook]
pub fn use_map_controls(map: Option<MapHandle>, locations: Vec<Location>) -> UseMapControlsHandle {
    let nav = use_mut_ref(NavigationState::new);
    let markers = use_mut_ref(|| None::<MarkerSet>);
    let version = use_state(|| 0u64);

    let ctx = EffectContext {
        nav: nav.clone(),
        map,
        markers,
        version: version.clone(),
    };

    {
        let ctx = ctx.clone();
        use_effect_with(locations, move |locations| {
            log::info!("🎮 Navigation received {} facilities", locations.len());
            ctx.nav.borrow_mut().set_locations(locations.clone());
            ctx.redraw();
            || ()
        });
    }

    let select_state = {
        let ctx = ctx.clone();
        Callback::from(move |name: String| ctx.dispatch(|nav| nav.select_state(&name)))
    };

    let select_location = select_location_callback(&ctx);

    let next_location = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.dispatch(|nav| nav.next_location()))
    };

    let previous_location = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.dispatch(|nav| nav.previous_location()))
    };

    let back_to_selection = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.dispatch(|nav| nav.back_to_selection()))
    };

    let open_modal = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            ctx.nav.borrow_mut().open_modal();
            ctx.redraw();
        })
    };

    let close_modal = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            ctx.nav.borrow_mut().close_modal();
            ctx.redraw();
        })
    };

    let set_city_filter = {
        let ctx = ctx.clone();
        Callback::from(move |filter: CityFilter| {
            ctx.nav.borrow_mut().set_city_filter(filter);
            ctx.redraw();
        })
    };

    let select_district = {
        let ctx = ctx.clone();
        Callback::from(move |properties: Properties| {
            ctx.nav.borrow_mut().select_district(properties);
            ctx.redraw();
        })
    };

    let select_city = {
        let ctx = ctx.clone();
        Callback::from(move |name: String| {
            ctx.nav.borrow_mut().select_city(name);
            ctx.redraw();
        })
    };

    let clear_selections = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            ctx.nav.borrow_mut().clear_selections();
            ctx.redraw();
        })
    };

    let toggle_analytics = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            {
                let mut nav = ctx.nav.borrow_mut();
                if nav.mode == ViewMode::BusinessAnalytics {
                    nav.exit_analytics();
                } else {
                    nav.enter_analytics();
                }
            }
            ctx.redraw();
        })
    };

    let escape = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.dispatch(|nav| nav.handle_escape()))
    };

    UseMapControlsHandle {
        nav,
        _version: version,
        select_state,
        select_location,
        next_location,
        previous_location,
        back_to_selection,
        open_modal,
        close_modal,
        set_city_filter,
        select_district,
        select_city,
        clear_selections,
        toggle_analytics,
        escape,
    }
}
