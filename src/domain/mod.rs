// Domain layer: order models and the ports the extractor and pipeline are written against.

pub mod model;
pub mod ports;
