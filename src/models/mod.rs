mod api;

pub use api::{ClientIpResponse, HealthResponse, SOURCE_PEER};
