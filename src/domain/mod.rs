// Domain layer: cookbook models and the lookup port. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
