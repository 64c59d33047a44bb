// Domain layer: reference data, result types and ports. Nothing here reads the clock or does I/O.

pub mod model;
pub mod ports;
