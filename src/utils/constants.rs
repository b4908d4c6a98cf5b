//! Shared identifiers: storage keys, map source/layer ids, asset paths.

// Local storage
pub const STORAGE_KEY_AUTH_TOKEN: &str = "authToken";
pub const STORAGE_KEY_USER: &str = "user";

// Map sources
pub const SOURCE_STATES: &str = "india-states";
pub const SOURCE_DISTRICTS: &str = "india-districts";
pub const SOURCE_CITIES: &str = "india-cities";

// Layer ids, in add order
pub const LAYER_STATE_HIGHLIGHT: &str = "state-highlight";
pub const LAYER_STATE_BOUNDARIES: &str = "state-boundaries";
pub const LAYER_STATE_OUTLINE: &str = "state-outline";
pub const STATE_LAYERS: [&str; 3] = [
    LAYER_STATE_HIGHLIGHT,
    LAYER_STATE_BOUNDARIES,
    LAYER_STATE_OUTLINE,
];

pub const LAYER_DISTRICT_FILL: &str = "district-fill";
pub const LAYER_DISTRICT_BOUNDARIES: &str = "district-boundaries";
pub const LAYER_DISTRICT_LABELS: &str = "district-labels";
pub const DISTRICT_LAYERS: [&str; 3] = [
    LAYER_DISTRICT_FILL,
    LAYER_DISTRICT_BOUNDARIES,
    LAYER_DISTRICT_LABELS,
];

pub const LAYER_CITIES_POINTS: &str = "cities-points";
pub const LAYER_CITIES_LABELS: &str = "cities-labels";

// GeoJSON feature property keys
pub const PROP_STATE_NAME: &str = "st_nm";
pub const PROP_DISTRICT_NAME: &str = "district";
pub const PROP_CITY_STATE: &str = "state";
pub const PROP_POPULATION_RANK: &str = "population_rank";
