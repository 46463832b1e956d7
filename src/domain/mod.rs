// Domain layer: models and ports. No filesystem or process access here.

pub mod model;
pub mod ports;
