// handlers/mod.rs - HTTP handlers
//
// public: service metadata and the OpenAPI document
// users:  the /api/users resource
pub mod public;
pub mod users;
