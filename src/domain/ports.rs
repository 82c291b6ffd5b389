use crate::domain::model::{Coordinates, IpAddress, PassWindow};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Resolves the caller's public IP address.
#[async_trait]
pub trait IpResolver: Send + Sync {
    async fn resolve_ip(&self) -> Result<IpAddress>;
}

/// Maps an IP address to geographic coordinates.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve_coordinates(&self, ip: &IpAddress) -> Result<Coordinates>;
}

/// Predicts upcoming ISS passes over a location.
#[async_trait]
pub trait PassPredictor: Send + Sync {
    async fn predict_passes(&self, coords: &Coordinates) -> Result<Vec<PassWindow>>;
}

pub trait ConfigProvider: Send + Sync {
    fn ip_endpoint(&self) -> &str;
    fn geolocation_endpoint(&self) -> &str;
    fn flyover_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

#[async_trait]
impl<T: IpResolver + ?Sized> IpResolver for Arc<T> {
    async fn resolve_ip(&self) -> Result<IpAddress> {
        (**self).resolve_ip().await
    }
}

#[async_trait]
impl<T: GeoResolver + ?Sized> GeoResolver for Arc<T> {
    async fn resolve_coordinates(&self, ip: &IpAddress) -> Result<Coordinates> {
        (**self).resolve_coordinates(ip).await
    }
}

#[async_trait]
impl<T: PassPredictor + ?Sized> PassPredictor for Arc<T> {
    async fn predict_passes(&self, coords: &Coordinates) -> Result<Vec<PassWindow>> {
        (**self).predict_passes(coords).await
    }
}
