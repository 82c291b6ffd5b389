// Adapters layer: HTTP implementations of the domain ports.

pub mod flyover;
pub mod geolocation;
pub mod http;
pub mod ip_lookup;

pub use flyover::HttpPassPredictor;
pub use geolocation::HttpGeoResolver;
pub use ip_lookup::HttpIpResolver;
