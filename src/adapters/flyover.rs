use crate::adapters::http::fetch_json_with_status;
use crate::domain::model::{Coordinates, PassWindow, Stage};
use crate::domain::ports::PassPredictor;
use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct FlyoverResponse {
    message: Option<String>,
    reason: Option<String>,
    response: Option<Vec<FlyoverEntry>>,
}

#[derive(Debug, Deserialize)]
struct FlyoverEntry {
    risetime: i64,
    duration: i64,
}

impl From<FlyoverEntry> for PassWindow {
    fn from(entry: FlyoverEntry) -> Self {
        PassWindow::new(entry.risetime, entry.duration)
    }
}

/// `base?lat=<latitude>&lon=<longitude>`, numbers in shortest round-trip form.
pub fn flyover_url(base: &Url, coords: &Coordinates) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("lat", &coords.latitude.to_string())
        .append_pair("lon", &coords.longitude.to_string());
    url
}

/// Predicts passes through an open-notify style `iss-pass.json` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPassPredictor {
    client: Client,
    base: Url,
}

impl HttpPassPredictor {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl PassPredictor for HttpPassPredictor {
    async fn predict_passes(&self, coords: &Coordinates) -> Result<Vec<PassWindow>> {
        coords.validate()?;

        let url = flyover_url(&self.base, coords);
        let (status, response): (u16, FlyoverResponse) =
            fetch_json_with_status(&self.client, &url, Stage::Flyover).await?;

        if response.message.as_deref() == Some("failure") {
            return Err(FlyoverError::ServerError {
                stage: Stage::Flyover,
                status,
                body: response.reason.unwrap_or_else(|| "failure".to_string()),
            });
        }

        let entries = response.response.ok_or_else(|| FlyoverError::ParseError {
            stage: Stage::Flyover,
            message: "missing response array".to_string(),
        })?;

        let passes: Vec<PassWindow> = entries.into_iter().map(PassWindow::from).collect();
        tracing::info!("✅ Received {} pass windows", passes.len());
        Ok(passes)
    }
}
