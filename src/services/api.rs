use crate::config::Config;
use crate::models::{
    error::AppError,
    measurement::{MeasurementQuery, MeasurementResult},
    options::{CityOption, ParameterOption, dedup_parameters},
};
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

// CONSTANTS
const BASE_URL: &str = "https://u50g7n0cbj.execute-api.us-east-1.amazonaws.com/v2";

// API CONFIGURATION
/// Configuration for the air-quality API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    country: String,
    city_limit: u32,
    parameter_limit: u32,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Returns the country filter applied to cities and measurements.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// URL for the sorted city list of the configured country.
    pub fn cities_url(&self) -> Result<String, AppError> {
        let limit = self.city_limit.to_string();
        self.build_url(
            "cities",
            &[
                ("sort", "asc"),
                ("order_by", "city"),
                ("limit", limit.as_str()),
                ("country", self.country.as_str()),
            ],
        )
    }

    /// URL for the parameter list.
    pub fn parameters_url(&self) -> Result<String, AppError> {
        let limit = self.parameter_limit.to_string();
        self.build_url("parameters", &[("limit", limit.as_str()), ("sort", "asc")])
    }

    /// URL for the single most recent measurement matching `query`.
    pub fn measurement_url(&self, query: &MeasurementQuery) -> Result<String, AppError> {
        self.build_url(
            "measurements",
            &[
                ("limit", "1"),
                ("country", self.country.as_str()),
                ("parameter", query.parameter.as_str()),
                ("city", query.city.as_str()),
            ],
        )
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<String, AppError> {
        let base = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&base, params)
            .map(String::from)
            .map_err(|e| AppError::ConfigError(format!("Invalid API URL {base}: {e}")))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    country: Option<String>,
    city_limit: Option<u32>,
    parameter_limit: Option<u32>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the country filter.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the page size of the city list.
    pub fn city_limit(mut self, limit: u32) -> Self {
        self.city_limit = Some(limit);
        self
    }

    /// Sets the page size of the parameter list.
    pub fn parameter_limit(mut self, limit: u32) -> Self {
        self.parameter_limit = Some(limit);
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.unwrap_or_else(|| BASE_URL.to_string()),
            country: self
                .country
                .unwrap_or_else(|| Config::COUNTRY_CODE.to_string()),
            city_limit: self.city_limit.unwrap_or(Config::CITY_PAGE_LIMIT),
            parameter_limit: self
                .parameter_limit
                .unwrap_or(Config::PARAMETER_PAGE_LIMIT),
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    results: Vec<T>,
}

#[derive(Deserialize, Debug)]
struct ApiCity {
    city: String,
}

impl From<ApiCity> for CityOption {
    fn from(c: ApiCity) -> Self {
        Self { id: c.city }
    }
}

#[derive(Deserialize, Debug)]
struct ApiParameter {
    name: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

impl From<ApiParameter> for ParameterOption {
    fn from(p: ApiParameter) -> Self {
        let display_name = p.display_name.unwrap_or_else(|| p.name.clone());
        Self {
            name: p.name,
            display_name,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ApiDate {
    utc: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct ApiMeasurement {
    city: String,
    value: f64,
    unit: String,
    parameter: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    date: Option<ApiDate>,
}

impl From<ApiMeasurement> for MeasurementResult {
    fn from(m: ApiMeasurement) -> Self {
        Self {
            city: m.city,
            value: m.value,
            unit: m.unit,
            parameter: m.parameter,
            location: m.location,
            last_updated: m.date.map(|d| d.utc),
        }
    }
}

// OPENAQ CLIENT
/// HTTP client for the air-quality measurements API.
#[derive(Clone)]
pub struct OpenAqClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl OpenAqClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetches the city list, one option per result.
    pub async fn fetch_cities(&self) -> Result<Vec<CityOption>, AppError> {
        let url = self.config.cities_url()?;

        let cities: Vec<ApiCity> = self.fetch(&url).await?;
        Ok(cities.into_iter().map(Into::into).collect())
    }

    /// Fetches the parameter list, deduplicated by name.
    pub async fn fetch_parameters(&self) -> Result<Vec<ParameterOption>, AppError> {
        let url = self.config.parameters_url()?;

        let parameters: Vec<ApiParameter> = self.fetch(&url).await?;
        Ok(dedup_parameters(parameters.into_iter().map(Into::into)))
    }

    /// Fetches the latest measurement for one slot; `None` when upstream has no record.
    pub async fn fetch_latest_measurement(
        &self,
        query: &MeasurementQuery,
    ) -> Result<Option<MeasurementResult>, AppError> {
        let url = self.config.measurement_url(query)?;

        let measurements: Vec<ApiMeasurement> = self.fetch(&url).await?;
        Ok(measurements.into_iter().next().map(Into::into))
    }

    /// Executes a single GET and unwraps the `results` envelope.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(self.error_for_status(status, body));
        }

        let api_response: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))?;

        Ok(api_response.results)
    }

    /// Converts a reqwest error into an appropriate `AppError`.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::Transport(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::Transport(format!("Request error: {error}"))
        } else {
            AppError::Transport(format!("Network error: {error}"))
        }
    }

    /// Creates an error carrying the upstream status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: String) -> AppError {
        AppError::Upstream {
            status: status.as_u16(),
            body,
        }
    }
}

// CONVENIENCE FUNCTIONS
/// Fetches city options using default configuration.
pub async fn fetch_city_options() -> Result<Vec<CityOption>, AppError> {
    OpenAqClient::new()?.fetch_cities().await
}

/// Fetches parameter options using default configuration.
pub async fn fetch_parameter_options() -> Result<Vec<ParameterOption>, AppError> {
    OpenAqClient::new()?.fetch_parameters().await
}
