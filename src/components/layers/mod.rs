pub mod cities;
pub mod district_boundaries;
pub mod state_boundaries;

pub use cities::Cities;
pub use district_boundaries::DistrictBoundaries;
pub use state_boundaries::StateBoundaries;
