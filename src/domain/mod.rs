// Domain layer: form and dataset models plus the document port.

pub mod model;
pub mod ports;
