use yew::prelude::*;

use crate::map::{CityFilter, ViewMode};
use crate::models::{Location, User};

#[derive(Properties, PartialEq)]
pub struct GameUiProps {
    pub user: User,
    pub mode: ViewMode,
    pub selected_state: Option<String>,
    pub available_states: Vec<String>,
    pub current_location: Option<Location>,
    pub current_index: usize,
    pub location_count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub is_animating: bool,
    pub city_filter: CityFilter,
    pub locations_loading: bool,
    pub locations_error: Option<String>,
    pub on_select_state: Callback<String>,
    pub on_next: Callback<()>,
    pub on_previous: Callback<()>,
    pub on_open_details: Callback<()>,
    pub on_back: Callback<()>,
    pub on_city_filter: Callback<CityFilter>,
    pub on_toggle_analytics: Callback<()>,
    pub on_logout: Callback<()>,
}

const CITY_FILTERS: [CityFilter; 4] = [
    CityFilter::All,
    CityFilter::Top10,
    CityFilter::Top50,
    CityFilter::Metros,
];

/// HUD laid over the map: header, the panel for the current view mode, and
/// the city filter bar.
#[function_component(GameUi)]
pub fn game_ui(props: &GameUiProps) -> Html {
    html! {
        <div class="game-ui">
            <header class="game-header">
                <div class="game-title">{"🏟️ ClayGrounds Tycoon"}</div>
                <div class="game-user">
                    <span>{&props.user.name}</span>
                    <button class="btn-logout" onclick={props.on_logout.reform(|_| ())}>
                        {"Sign out"}
                    </button>
                </div>
            </header>

            { mode_panel(props) }
            { city_filter_bar(props) }
            { api_status(props) }
        </div>
    }
}

fn mode_panel(props: &GameUiProps) -> Html {
    match props.mode {
        ViewMode::StateSelection => state_selection_panel(props),
        ViewMode::StateFocused => html! {
            <div class="game-panel entering">
                <h2>{format!("Entering {}...", props.selected_state.as_deref().unwrap_or(""))}</h2>
            </div>
        },
        ViewMode::LocationNavigation => location_panel(props),
        ViewMode::BusinessAnalytics => analytics_panel(props),
    }
}

fn state_selection_panel(props: &GameUiProps) -> Html {
    let states = props.available_states.iter().map(|name| {
        let on_select_state = props.on_select_state.clone();
        let state_name = name.clone();
        html! {
            <button
                class="state-chip"
                key={name.clone()}
                onclick={Callback::from(move |_| on_select_state.emit(state_name.clone()))}
            >
                {name}
            </button>
        }
    });

    html! {
        <div class="game-panel state-selection">
            <h2>{"Choose your territory"}</h2>
            <p class="hint">{"Click a state on the map, or pick one below"}</p>
            <div class="state-list">{ for states }</div>
            <button class="btn-analytics" onclick={props.on_toggle_analytics.reform(|_| ())}>
                {"📊 Business Overview"}
            </button>
        </div>
    }
}

fn location_panel(props: &GameUiProps) -> Html {
    let position = if props.location_count > 0 {
        format!("{} / {}", props.current_index + 1, props.location_count)
    } else {
        "0 / 0".to_string()
    };

    html! {
        <div class="game-panel location-navigation">
            <div class="panel-header">
                <h2>{props.selected_state.as_deref().unwrap_or("")}</h2>
                <button class="btn-back" onclick={props.on_back.reform(|_| ())}>
                    {"← All states"}
                </button>
            </div>

            if let Some(location) = &props.current_location {
                <div class="facility-card">
                    <h3>{&location.location_name}</h3>
                    <p class="facility-meta">
                        <span class={classes!("status-dot", location.is_active().then_some("active"))} />
                        {location.status()}
                        if let Some(city) = &location.city {
                            {" · "}{city}
                        }
                    </p>
                    <button class="btn-details" onclick={props.on_open_details.reform(|_| ())}>
                        {"View details"}
                    </button>
                </div>
            } else {
                <p class="hint">{"No facilities in this state yet"}</p>
            }

            <div class="facility-stepper">
                <button
                    class="btn-step"
                    disabled={!props.has_previous || props.is_animating}
                    onclick={props.on_previous.reform(|_| ())}
                >
                    {"◀"}
                </button>
                <span class="stepper-position">{position}</span>
                <button
                    class="btn-step"
                    disabled={!props.has_next || props.is_animating}
                    onclick={props.on_next.reform(|_| ())}
                >
                    {"▶"}
                </button>
            </div>
        </div>
    }
}

fn analytics_panel(props: &GameUiProps) -> Html {
    html! {
        <div class="game-panel analytics">
            <div class="panel-header">
                <h2>{"📊 Business Overview"}</h2>
                <button class="btn-back" onclick={props.on_toggle_analytics.reform(|_| ())}>
                    {"← Back"}
                </button>
            </div>
            <p class="hint">{"Portfolio summary across all territories"}</p>
        </div>
    }
}

fn city_filter_bar(props: &GameUiProps) -> Html {
    let buttons = CITY_FILTERS.iter().map(|filter| {
        let on_city_filter = props.on_city_filter.clone();
        let filter = *filter;
        let active = props.city_filter == filter;
        html! {
            <button
                class={classes!("filter-chip", active.then_some("active"))}
                key={filter.label()}
                onclick={Callback::from(move |_| on_city_filter.emit(filter))}
            >
                {filter.label()}
            </button>
        }
    });

    html! {
        <div class="city-filter-bar">{ for buttons }</div>
    }
}

fn api_status(props: &GameUiProps) -> Html {
    html! {
        <>
            if props.locations_loading {
                <div class="api-status loading">{"Loading facilities..."}</div>
            }
            if let Some(error) = &props.locations_error {
                <div class="api-status error">{format!("⚠️ {}", error)}</div>
            }
        </>
    }
}
