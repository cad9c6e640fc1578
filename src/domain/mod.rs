// Domain layer: records and ports. Concrete HTTP and filesystem adapters live in `adapters`.

pub mod model;
pub mod ports;
