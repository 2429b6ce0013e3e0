pub mod auth;

pub use auth::{AuthService, LoginRequest, LoginResponse, SignupRequest};
