// Domain layer: read-only views of Cloudflare entities, request inputs and the API port.

pub mod model;
pub mod ports;
