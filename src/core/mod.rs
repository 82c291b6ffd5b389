pub mod format;
pub mod pipeline;

pub use crate::domain::model::{Coordinates, IpAddress, PassWindow, Stage};
pub use crate::domain::ports::{ConfigProvider, GeoResolver, IpResolver, PassPredictor};
pub use crate::utils::error::Result;
