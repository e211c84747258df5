// Library root: configuration, request parsing and the HTTP layer, exposed
// so integration tests can drive the router in-process.

pub mod config;
pub mod params;
pub mod routes;
pub mod server;
