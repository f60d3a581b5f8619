// Domain layer: calculator models and ports. No network or runtime dependencies.

pub mod model;
pub mod ports;
