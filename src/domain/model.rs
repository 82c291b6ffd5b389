use crate::utils::error::{FlyoverError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_range, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One external call of the flyover pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    IpLookup,
    Geolocation,
    Flyover,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpLookup => write!(f, "IP address"),
            Self::Geolocation => write!(f, "location of IP"),
            Self::Flyover => write!(f, "ISS flyover times"),
        }
    }
}

/// Public IP address of the caller, as reported by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpAddress(String);

impl IpAddress {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_non_empty_string("ip", &value)?;
        Ok(Self(value.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IpAddress {
    type Error = FlyoverError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<IpAddress> for String {
    fn from(ip: IpAddress) -> Self {
        ip.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds validated coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coords = Self {
            latitude,
            longitude,
        };
        coords.validate()?;
        Ok(coords)
    }
}

impl Validate for Coordinates {
    fn validate(&self) -> Result<()> {
        validate_finite("latitude", self.latitude)?;
        validate_finite("longitude", self.longitude)?;
        validate_range("latitude", self.latitude, -90.0, 90.0)?;
        validate_range("longitude", self.longitude, -180.0, 180.0)?;
        Ok(())
    }
}

/// A predicted visibility window of the ISS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassWindow {
    /// Unix seconds.
    pub rise_time: i64,
    /// Seconds.
    pub duration: i64,
}

impl PassWindow {
    pub fn new(rise_time: i64, duration: i64) -> Self {
        Self {
            rise_time,
            duration,
        }
    }

    pub fn rise_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.rise_time, 0)
    }
}
