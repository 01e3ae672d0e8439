//! Data Transfer Objects (DTOs) for the SmileSync hub.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs
//! - `http`: HTTP API request / response DTOs

pub mod conversion;
pub mod error;
pub mod http;
pub mod websocket;

pub use error::DecodeError;
