//! REST client for the ClayGrounds partner API. Stateless; no business logic.

use gloo_net::http::Request;

use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::{Location, LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.api_base_url.clone(),
        }
    }

    /// All facilities, full detail.
    pub async fn get_all_locations(&self) -> Result<Vec<Location>, AppError> {
        let url = format!("{}/api/locations/all", self.base_url);
        log::info!("🏟️ Fetching all locations...");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(AppError::Fetch(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        let locations = response
            .json::<Vec<Location>>()
            .await
            .map_err(|e| AppError::MalformedData(format!("Parse error: {}", e)))?;

        log::info!("✅ Locations loaded: {}", locations.len());
        Ok(locations)
    }

    /// Facilities that carry coordinates the map can place. NaN and
    /// out-of-range values survive this filter; marker creation rejects them
    /// individually.
    pub async fn get_locations_with_coordinates(&self) -> Result<Vec<Location>, AppError> {
        let locations = self.get_all_locations().await?;
        let with_coords: Vec<Location> = locations
            .into_iter()
            .filter(Location::has_coordinates)
            .collect();
        log::info!("🗺️ Locations with coordinates: {}", with_coords.len());
        Ok(with_coords)
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse, AppError> {
        let url = format!("{}/api/employees/auth/login", self.base_url);
        let request = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 Logging in: {}", phone);

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| AppError::Fetch(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Network error: {}", e)))?;

        if response.status() == 401 {
            return Err(AppError::Auth("Invalid phone number or password".to_string()));
        }

        if !response.ok() {
            return Err(AppError::Fetch(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| AppError::MalformedData(format!("Parse error: {}", e)))
    }
}
