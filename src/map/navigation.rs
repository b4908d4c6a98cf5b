//! Game navigation state machine. All transitions are pure: a method
//! mutates the state and returns the list of side effects the caller must
//! run against the map. That keeps every transition testable off-screen,
//! and makes the animation-settle race explicit through the epoch counter.

use crate::config::CONFIG;
use crate::map::layer_specs::CityFilter;
use crate::map::markers::parse_coordinates;
use crate::map::viewport::bounds_for;
use crate::models::{Location, Properties};
use crate::utils::state_names::map_api_state_to_geojson;

const LOCATION_ZOOM: f64 = 10.0;
const FIT_BOUNDS_PADDING: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Country overview; states are clickable.
    StateSelection,
    /// A state was picked; the camera is flying to it.
    StateFocused,
    /// Inside a state, stepping through facilities.
    LocationNavigation,
    BusinessAnalytics,
}

/// What a transition settles into once its animation window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleKind {
    /// State entry finished: show markers and unlock navigation.
    EnterState,
    /// Camera-only move finished: just unlock.
    AnimationOnly,
}

/// Imperative work a transition requires. Coordinates are `(lng, lat)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FitBounds {
        sw: (f64, f64),
        ne: (f64, f64),
        padding: u32,
        duration_ms: u32,
    },
    EaseTo {
        center: (f64, f64),
        zoom: f64,
        duration_ms: u32,
    },
    FlyTo {
        center: (f64, f64),
        zoom: f64,
        duration_ms: u32,
    },
    ReplaceMarkers,
    UpdateMarkerCurrent,
    ClearMarkers,
    ScheduleSettle {
        epoch: u64,
        delay_ms: u32,
        kind: SettleKind,
    },
}

pub struct NavigationState {
    pub mode: ViewMode,
    pub selected_state: Option<String>,
    pub selected_district: Option<Properties>,
    pub selected_city: Option<String>,
    pub city_filter: CityFilter,
    pub all_locations: Vec<Location>,
    pub state_locations: Vec<Location>,
    pub current_location_index: usize,
    pub is_animating: bool,
    pub modal_open: bool,
    // Bumped whenever an in-flight settle must be abandoned
    epoch: u64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::StateSelection,
            selected_state: None,
            selected_district: None,
            selected_city: None,
            city_filter: CityFilter::All,
            all_locations: Vec::new(),
            state_locations: Vec::new(),
            current_location_index: 0,
            is_animating: false,
            modal_open: false,
            epoch: 0,
        }
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.state_locations.get(self.current_location_index)
    }

    /// Facilities for `state_name` as the boundary data names it. API rows
    /// carry API spellings, so each row's state goes through the name map
    /// before comparing.
    fn locations_in_state(&self, state_name: &str) -> Vec<Location> {
        self.all_locations
            .iter()
            .filter(|loc| {
                loc.state
                    .as_deref()
                    .map(|s| map_api_state_to_geojson(s) == state_name)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    pub fn set_locations(&mut self, locations: Vec<Location>) {
        self.all_locations = locations;
        if let Some(state) = self.selected_state.clone() {
            self.state_locations = self.locations_in_state(&state);
            self.current_location_index = self
                .current_location_index
                .min(self.state_locations.len().saturating_sub(1));
        }
    }

    /// Enter a state: filter its facilities, fit the camera over them, and
    /// schedule the settle that will reveal markers. State polygons are only
    /// clickable from the country overview, so any other mode ignores the
    /// click; mid-animation clicks are ignored too.
    pub fn select_state(&mut self, state_name: &str) -> Vec<Effect> {
        if self.is_animating || self.mode != ViewMode::StateSelection {
            log::warn!("🎮 Ignoring state selection in {:?}", self.mode);
            return Vec::new();
        }

        self.epoch += 1;
        self.mode = ViewMode::StateFocused;
        self.selected_state = Some(state_name.to_string());
        self.selected_district = None;
        self.selected_city = None;
        self.state_locations = self.locations_in_state(state_name);
        self.current_location_index = 0;
        self.is_animating = true;

        log::info!(
            "🎮 Entering {} with {} facilities",
            state_name,
            self.state_locations.len()
        );

        let duration_ms = CONFIG.animation_config.state_entry_ms;
        let mut effects = Vec::new();
        if let Some((sw, ne)) = bounds_for(&self.state_locations) {
            effects.push(Effect::FitBounds {
                sw,
                ne,
                padding: FIT_BOUNDS_PADDING,
                duration_ms,
            });
        }
        effects.push(Effect::ScheduleSettle {
            epoch: self.epoch,
            delay_ms: duration_ms,
            kind: SettleKind::EnterState,
        });
        effects
    }

    /// Complete a transition scheduled at `epoch`. A settle whose epoch was
    /// superseded is a no-op; the user already moved on.
    pub fn settle(&mut self, epoch: u64, kind: SettleKind) -> Vec<Effect> {
        if epoch != self.epoch {
            log::info!("🎮 Dropping stale settle (epoch {} != {})", epoch, self.epoch);
            return Vec::new();
        }

        self.is_animating = false;
        match kind {
            SettleKind::EnterState => {
                self.mode = ViewMode::LocationNavigation;
                vec![Effect::ReplaceMarkers]
            }
            SettleKind::AnimationOnly => Vec::new(),
        }
    }

    /// Jump to a facility by index and fly the camera to it.
    pub fn select_location(&mut self, index: usize) -> Vec<Effect> {
        if self.is_animating || index >= self.state_locations.len() {
            return Vec::new();
        }

        self.current_location_index = index;
        let mut effects = vec![Effect::UpdateMarkerCurrent];
        if let Some(center) = self.current_location().and_then(parse_coordinates) {
            effects.push(Effect::FlyTo {
                center,
                zoom: LOCATION_ZOOM,
                duration_ms: CONFIG.animation_config.location_fly_ms,
            });
        }
        effects
    }

    /// Step forward without wrapping.
    pub fn next_location(&mut self) -> Vec<Effect> {
        if self.current_location_index + 1 >= self.state_locations.len() {
            return Vec::new();
        }
        let next = self.current_location_index + 1;
        self.select_location(next)
    }

    /// Step back without wrapping.
    pub fn previous_location(&mut self) -> Vec<Effect> {
        if self.current_location_index == 0 {
            return Vec::new();
        }
        let prev = self.current_location_index - 1;
        self.select_location(prev)
    }

    pub fn has_next_location(&self) -> bool {
        self.current_location_index + 1 < self.state_locations.len()
    }

    pub fn has_previous_location(&self) -> bool {
        self.current_location_index > 0 && !self.state_locations.is_empty()
    }

    /// Leave the state and ease back to the country overview. Bumping the
    /// epoch abandons any settle still in flight from the state entry.
    pub fn back_to_selection(&mut self) -> Vec<Effect> {
        self.epoch += 1;
        self.mode = ViewMode::StateSelection;
        self.selected_state = None;
        self.selected_district = None;
        self.selected_city = None;
        self.state_locations.clear();
        self.current_location_index = 0;
        self.modal_open = false;
        self.is_animating = true;

        log::info!("🎮 Back to state selection");

        let duration_ms = CONFIG.animation_config.reset_view_ms;
        vec![
            Effect::ClearMarkers,
            Effect::EaseTo {
                center: (
                    CONFIG.map_config.default_center_lng,
                    CONFIG.map_config.default_center_lat,
                ),
                zoom: CONFIG.map_config.default_zoom,
                duration_ms,
            },
            Effect::ScheduleSettle {
                epoch: self.epoch,
                delay_ms: duration_ms,
                kind: SettleKind::AnimationOnly,
            },
        ]
    }

    /// Drop district and city selections without leaving the state.
    pub fn clear_selections(&mut self) {
        self.selected_district = None;
        self.selected_city = None;
        self.city_filter = CityFilter::All;
    }

    pub fn select_district(&mut self, properties: Properties) {
        if self.is_animating {
            return;
        }
        self.selected_district = Some(properties);
    }

    pub fn select_city(&mut self, name: String) {
        if self.is_animating {
            return;
        }
        self.selected_city = Some(name);
    }

    pub fn set_city_filter(&mut self, filter: CityFilter) {
        self.city_filter = filter;
    }

    pub fn open_modal(&mut self) {
        if self.current_location().is_some() {
            self.modal_open = true;
        }
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Escape closes the modal first; with no modal it backs out of the
    /// current state or analytics view.
    pub fn handle_escape(&mut self) -> Vec<Effect> {
        if self.modal_open {
            self.modal_open = false;
            return Vec::new();
        }
        match self.mode {
            ViewMode::BusinessAnalytics => {
                self.exit_analytics();
                Vec::new()
            }
            ViewMode::StateFocused | ViewMode::LocationNavigation => self.back_to_selection(),
            ViewMode::StateSelection => Vec::new(),
        }
    }

    /// Analytics is reachable only from the country overview.
    pub fn enter_analytics(&mut self) {
        if self.mode == ViewMode::StateSelection {
            self.mode = ViewMode::BusinessAnalytics;
        }
    }

    pub fn exit_analytics(&mut self) {
        if self.mode == ViewMode::BusinessAnalytics {
            self.mode = ViewMode::StateSelection;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(name: &str, state: &str, lat: f64, lng: f64) -> Location {
        serde_json::from_value(json!({
            "location_name": name,
            "state": state,
            "latitude": lat,
            "longitude": lng,
        }))
        .unwrap()
    }

    fn state_with_locations() -> NavigationState {
        let mut nav = NavigationState::new();
        nav.set_locations(vec![
            location("Chattarpur", "Delhi", 28.50, 77.18),
            location("Rohini", "NCT of Delhi", 28.74, 77.06),
            location("Whitefield", "Karnataka", 12.97, 77.75),
        ]);
        nav
    }

    fn settle_args(effects: &[Effect]) -> (u64, SettleKind) {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleSettle { epoch, kind, .. } => Some((*epoch, *kind)),
                _ => None,
            })
            .expect("transition should schedule a settle")
    }

    #[test]
    fn select_state_maps_api_names_onto_boundary_names() {
        // Some API rows say "NCT of Delhi"; the boundary file says "Delhi"
        let mut nav = state_with_locations();
        nav.select_state("Delhi");
        assert_eq!(nav.state_locations.len(), 2);
        assert_eq!(nav.mode, ViewMode::StateFocused);
        assert!(nav.is_animating);
    }

    #[test]
    fn select_state_fits_bounds_then_settles_into_navigation() {
        let mut nav = state_with_locations();
        let effects = nav.select_state("Delhi");
        assert!(matches!(effects[0], Effect::FitBounds { .. }));

        let (epoch, kind) = settle_args(&effects);
        assert_eq!(kind, SettleKind::EnterState);
        let settled = nav.settle(epoch, kind);
        assert_eq!(settled, vec![Effect::ReplaceMarkers]);
        assert_eq!(nav.mode, ViewMode::LocationNavigation);
        assert!(!nav.is_animating);
    }

    #[test]
    fn stale_settle_is_dropped() {
        let mut nav = state_with_locations();
        let first = nav.select_state("Delhi");
        let (stale_epoch, kind) = settle_args(&first);

        // User backs out before the entry animation settles
        let back = nav.back_to_selection();
        let effects = nav.settle(stale_epoch, kind);
        assert!(effects.is_empty());
        assert_eq!(nav.mode, ViewMode::StateSelection);
        assert!(nav.state_locations.is_empty());

        // The reset's own settle still lands
        let (fresh_epoch, fresh_kind) = settle_args(&back);
        nav.settle(fresh_epoch, fresh_kind);
        assert!(!nav.is_animating);
    }

    #[test]
    fn selection_is_ignored_while_animating() {
        let mut nav = state_with_locations();
        nav.select_state("Delhi");
        assert!(nav.select_state("Karnataka").is_empty());
        assert_eq!(nav.selected_state.as_deref(), Some("Delhi"));
    }

    #[test]
    fn state_clicks_are_inert_while_navigating_facilities() {
        let mut nav = state_with_locations();
        let effects = nav.select_state("Delhi");
        let (epoch, kind) = settle_args(&effects);
        nav.settle(epoch, kind);
        nav.next_location();
        assert_eq!(nav.current_location_index, 1);

        // A click on the still-present state polygon must not replay entry
        let effects = nav.select_state("Delhi");
        assert!(effects.is_empty());
        assert_eq!(nav.mode, ViewMode::LocationNavigation);
        assert_eq!(nav.current_location_index, 1);

        assert!(nav.select_state("Karnataka").is_empty());
        assert_eq!(nav.selected_state.as_deref(), Some("Delhi"));
    }

    #[test]
    fn location_stepping_clamps_at_both_ends() {
        let mut nav = state_with_locations();
        let effects = nav.select_state("Delhi");
        let (epoch, kind) = settle_args(&effects);
        nav.settle(epoch, kind);

        assert!(nav.previous_location().is_empty());
        assert_eq!(nav.current_location_index, 0);

        let forward = nav.next_location();
        assert!(forward.contains(&Effect::UpdateMarkerCurrent));
        assert!(forward.iter().any(|e| matches!(e, Effect::FlyTo { .. })));
        assert_eq!(nav.current_location_index, 1);

        assert!(nav.next_location().is_empty());
        assert_eq!(nav.current_location_index, 1);
        assert!(!nav.has_next_location());
        assert!(nav.has_previous_location());
    }

    #[test]
    fn back_to_selection_eases_to_country_overview() {
        let mut nav = state_with_locations();
        let effects = nav.select_state("Karnataka");
        let (epoch, kind) = settle_args(&effects);
        nav.settle(epoch, kind);
        nav.open_modal();
        nav.select_district(
            json!({ "district": "Bengaluru Urban" }).as_object().cloned().unwrap(),
        );
        nav.select_city("Bengaluru".to_string());

        // Leaving the state clears district and city transitively
        let back = nav.back_to_selection();
        assert_eq!(back[0], Effect::ClearMarkers);
        assert!(matches!(back[1], Effect::EaseTo { zoom, .. } if zoom == 4.0));
        assert!(!nav.modal_open);
        assert_eq!(nav.selected_state, None);
        assert_eq!(nav.selected_district, None);
        assert_eq!(nav.selected_city, None);
    }

    #[test]
    fn district_and_city_clicks_are_ignored_mid_animation() {
        let mut nav = state_with_locations();
        nav.select_state("Karnataka");
        assert!(nav.is_animating);

        nav.select_district(json!({ "district": "Mysuru" }).as_object().cloned().unwrap());
        nav.select_city("Mysuru".to_string());
        assert_eq!(nav.selected_district, None);
        assert_eq!(nav.selected_city, None);
    }

    #[test]
    fn unplaceable_rows_survive_the_state_filter_but_not_marker_placement() {
        let mut nav = NavigationState::new();
        let mut rows = vec![location("A", "Delhi", 28.6, 77.2)];
        rows.push(
            serde_json::from_value(json!({
                "location_name": "B",
                "state": "Delhi",
                "latitude": "NaN",
                "longitude": 77.0,
            }))
            .unwrap(),
        );
        nav.set_locations(rows);

        nav.select_state("Delhi");
        assert_eq!(nav.state_locations.len(), 2);
        assert_eq!(
            crate::map::markers::renderable_indices(&nav.state_locations),
            vec![0]
        );
    }

    #[test]
    fn escape_closes_modal_before_leaving_the_state() {
        let mut nav = state_with_locations();
        let effects = nav.select_state("Karnataka");
        let (epoch, kind) = settle_args(&effects);
        nav.settle(epoch, kind);

        nav.open_modal();
        assert!(nav.handle_escape().is_empty());
        assert!(!nav.modal_open);
        assert_eq!(nav.mode, ViewMode::LocationNavigation);

        let back = nav.handle_escape();
        assert!(!back.is_empty());
        assert_eq!(nav.mode, ViewMode::StateSelection);
    }

    #[test]
    fn analytics_only_toggles_from_state_selection() {
        let mut nav = state_with_locations();
        nav.enter_analytics();
        assert_eq!(nav.mode, ViewMode::BusinessAnalytics);
        nav.exit_analytics();
        assert_eq!(nav.mode, ViewMode::StateSelection);

        nav.select_state("Karnataka");
        nav.enter_analytics();
        assert_eq!(nav.mode, ViewMode::StateFocused);
    }

    #[test]
    fn clear_selections_keeps_the_state_but_drops_the_rest() {
        let mut nav = state_with_locations();
        nav.select_state("Karnataka");
        nav.select_city("Bengaluru".to_string());
        nav.set_city_filter(CityFilter::Top10);

        nav.clear_selections();
        assert_eq!(nav.selected_state.as_deref(), Some("Karnataka"));
        assert_eq!(nav.selected_city, None);
        assert_eq!(nav.city_filter, CityFilter::All);
    }

    #[test]
    fn modal_needs_a_current_location() {
        let mut nav = NavigationState::new();
        nav.open_modal();
        assert!(!nav.modal_open);
    }
}
