// Domain layer: models and ports. Concrete HTTP implementations live in adapters.

pub mod model;
pub mod ports;
