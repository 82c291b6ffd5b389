use crate::adapters::http::fetch_json;
use crate::domain::model::{Coordinates, IpAddress, Stage};
use crate::domain::ports::GeoResolver;
use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct GeoResponse {
    data: Option<GeoData>,
}

#[derive(Debug, Deserialize)]
struct GeoData {
    latitude: Option<Degrees>,
    longitude: Option<Degrees>,
}

/// The provider sends degrees as strings ("40.71570"); plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn into_f64(self, field: &str) -> Result<f64> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text.trim().parse().map_err(|_| FlyoverError::ParseError {
                stage: Stage::Geolocation,
                message: format!("{} is not a number: {:?}", field, text),
            }),
        }
    }
}

fn required(value: Option<Degrees>, field: &str) -> Result<f64> {
    value
        .ok_or_else(|| FlyoverError::ParseError {
            stage: Stage::Geolocation,
            message: format!("missing data.{}", field),
        })?
        .into_f64(field)
}

/// Appends `ip` as the last path segment of `base`.
pub fn geolocation_url(base: &Url, ip: &IpAddress) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FlyoverError::ValidationError {
            field: "endpoints.geolocation".to_string(),
            value: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .push(ip.as_str());
    Ok(url)
}

/// Resolves coordinates through a `{ "data": { "latitude", "longitude" } }` endpoint keyed by IP.
#[derive(Debug, Clone)]
pub struct HttpGeoResolver {
    client: Client,
    base: Url,
}

impl HttpGeoResolver {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl GeoResolver for HttpGeoResolver {
    async fn resolve_coordinates(&self, ip: &IpAddress) -> Result<Coordinates> {
        let url = geolocation_url(&self.base, ip)?;
        let response: GeoResponse = fetch_json(&self.client, &url, Stage::Geolocation).await?;

        let data = response.data.ok_or_else(|| FlyoverError::ParseError {
            stage: Stage::Geolocation,
            message: "missing data object".to_string(),
        })?;

        let coords = Coordinates {
            latitude: required(data.latitude, "latitude")?,
            longitude: required(data.longitude, "longitude")?,
        };
        coords.validate().map_err(|e| FlyoverError::ParseError {
            stage: Stage::Geolocation,
            message: e.to_string(),
        })?;

        tracing::info!(
            "✅ Located {} at ({}, {})",
            ip,
            coords.latitude,
            coords.longitude
        );
        Ok(coords)
    }
}
