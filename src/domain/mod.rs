// Domain layer: request-scoped value types and the ports the orchestrator depends on.

pub mod model;
pub mod ports;
