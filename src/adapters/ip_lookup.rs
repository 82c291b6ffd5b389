use crate::adapters::http::fetch_json;
use crate::domain::model::{IpAddress, Stage};
use crate::domain::ports::IpResolver;
use crate::utils::error::{FlyoverError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    ip: String,
}

/// Looks up the public IP through a `{ "ip": "..." }` JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpIpResolver {
    client: Client,
    endpoint: Url,
}

impl HttpIpResolver {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve_ip(&self) -> Result<IpAddress> {
        let response: IpLookupResponse =
            fetch_json(&self.client, &self.endpoint, Stage::IpLookup).await?;

        if response.ip.trim().is_empty() {
            return Err(FlyoverError::NotFoundError {
                stage: Stage::IpLookup,
            });
        }

        let ip = IpAddress::new(response.ip)?;
        tracing::info!("✅ Resolved public IP: {}", ip);
        Ok(ip)
    }
}
