//! HTTP inbound adapter exposing the JSON API.

pub mod csrf;
pub mod error;
pub mod health;
pub mod packages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
