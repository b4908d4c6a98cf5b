pub mod constants;
pub mod state_names;
pub mod storage;

pub use state_names::map_api_state_to_geojson;
pub use storage::{
    load_from_storage, load_raw, remove_from_storage, save_raw, save_to_storage,
};
