use crate::domain::model::Stage;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FlyoverError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Builds the shared HTTP client for all stages.
pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| FlyoverError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Bodies that carry no payload at all.
pub fn is_empty_payload(body: &str) -> bool {
    matches!(body.trim(), "" | "[]" | "{}" | "null")
}

/// GETs `url` and decodes its JSON body.
///
/// A non-success status always ends the call as `ServerError` before the
/// body is parsed. An empty payload is `NotFoundError`; anything that does
/// not decode into `T` is `ParseError`.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url, stage: Stage) -> Result<T> {
    Ok(fetch_json_with_status(client, url, stage).await?.1)
}

/// Like [`fetch_json`], also returning the (successful) status code.
pub async fn fetch_json_with_status<T: DeserializeOwned>(
    client: &Client,
    url: &Url,
    stage: Stage,
) -> Result<(u16, T)> {
    tracing::debug!("📡 Fetching {}: {}", stage, url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FlyoverError::NetworkError { stage, source })?;

    let status = response.status();
    tracing::debug!("{} response status: {}", stage, status);

    let body = response
        .text()
        .await
        .map_err(|source| FlyoverError::NetworkError { stage, source })?;

    if !status.is_success() {
        return Err(FlyoverError::ServerError {
            stage,
            status: status.as_u16(),
            body,
        });
    }

    if is_empty_payload(&body) {
        return Err(FlyoverError::NotFoundError { stage });
    }

    let payload = serde_json::from_str(&body).map_err(|e| FlyoverError::ParseError {
        stage,
        message: e.to_string(),
    })?;
    Ok((status.as_u16(), payload))
}
