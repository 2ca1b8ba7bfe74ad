pub mod auth;
pub mod response;

pub use auth::{auth_gate_middleware, AuthGate, AuthRejection};
pub use response::{ApiResponse, ApiResult};
