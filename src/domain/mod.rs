// Domain layer: run models and ports (interfaces). No filesystem or codec code lives here.

pub mod model;
pub mod ports;
