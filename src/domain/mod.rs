// Domain layer: record models and ports (interfaces). No dependencies on the
// concrete HTTP clients or storage backends.

pub mod model;
pub mod ports;
